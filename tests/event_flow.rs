//! Integration tests for the event dispatch and navigation flow
//!
//! Exercises the public API the way the viewer wires it: synthetic events
//! through the dispatcher, key trackers updated per frame, and camera
//! navigation driven by listeners.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use glam::Vec3;

use gimbal::app::input::{Event, EventDispatcher, EventKind, KeyCode, KeyRegistry, Modifiers};
use gimbal::config::CameraConfig;
use gimbal::scene::{Camera, CameraController, NavMode};

fn controller() -> Rc<RefCell<CameraController>> {
    let camera = Camera::new(
        Vec3::new(0.0, 0.0, 2.0),
        Vec3::ZERO,
        Vec3::Y,
        45.0,
        0.01,
        1000.0,
    );
    Rc::new(RefCell::new(CameraController::new(
        camera,
        (640.0, 480.0),
        &CameraConfig::default(),
    )))
}

/// Wire modifier listeners the way the viewer does
fn wire_modifiers(dispatcher: &mut EventDispatcher, controller: &Rc<RefCell<CameraController>>) {
    let shared = Rc::clone(controller);
    dispatcher.register(EventKind::KeyDown, move |event, _| {
        if let Event::KeyDown { key, .. } = *event {
            match key {
                KeyCode::Shift => shared.borrow_mut().set_pan_held(true),
                KeyCode::Ctrl => shared.borrow_mut().set_zoom_held(true),
                _ => {}
            }
        }
    });
    let shared = Rc::clone(controller);
    dispatcher.register(EventKind::KeyUp, move |event, _| {
        if let Event::KeyUp { key, .. } = *event {
            match key {
                KeyCode::Shift => shared.borrow_mut().set_pan_held(false),
                KeyCode::Ctrl => shared.borrow_mut().set_zoom_held(false),
                _ => {}
            }
        }
    });
}

#[test]
fn test_quit_key_scenario() {
    let mut registry = KeyRegistry::new();
    registry.track(KeyCode::Q);

    let held: HashSet<KeyCode> = [KeyCode::Q].into();
    let empty: HashSet<KeyCode> = HashSet::new();

    // frame 1: pressed
    registry.update_all(&held);
    let key = registry.key(KeyCode::Q).unwrap();
    assert!(key.is_pressed());
    assert!(!key.is_clicked());

    // frame 2: still pressed
    registry.update_all(&held);
    let key = registry.key(KeyCode::Q).unwrap();
    assert!(key.is_pressed());
    assert!(!key.is_clicked());

    // frame 3: released, click fires exactly here
    registry.update_all(&empty);
    let key = registry.key(KeyCode::Q).unwrap();
    assert!(!key.is_pressed());
    assert!(key.is_clicked());
}

#[test]
fn test_wheel_listener_receives_payload_once() {
    let mut dispatcher = EventDispatcher::new();
    let seen = Rc::new(RefCell::new(Vec::new()));

    let sink = Rc::clone(&seen);
    dispatcher.register(EventKind::MouseWheel, move |event, _| {
        if let Event::MouseWheel { dx, dy } = *event {
            sink.borrow_mut().push((dx, dy));
        }
    });

    dispatcher.dispatch(&Event::MouseWheel { dx: 0.0, dy: -5.0 });
    assert_eq!(*seen.borrow(), vec![(0.0, -5.0)]);
}

#[test]
fn test_dispatch_order_across_kinds() {
    let mut dispatcher = EventDispatcher::new();
    let order = Rc::new(RefCell::new(Vec::new()));

    for label in ["a", "b", "c"] {
        let order = Rc::clone(&order);
        dispatcher.register(EventKind::WindowFocus, move |_, _| {
            order.borrow_mut().push(label);
        });
    }
    // a listener for another kind must not fire
    {
        let order = Rc::clone(&order);
        dispatcher.register(EventKind::WindowMove, move |_, _| {
            order.borrow_mut().push("move");
        });
    }

    dispatcher.dispatch(&Event::WindowFocus { focused: true });
    assert_eq!(*order.borrow(), vec!["a", "b", "c"]);
}

#[test]
fn test_modifier_events_flip_navigation_mode() {
    let mut dispatcher = EventDispatcher::new();
    let controller = controller();
    wire_modifiers(&mut dispatcher, &controller);

    assert_eq!(controller.borrow().mode(), NavMode::Orbit);

    dispatcher.dispatch(&Event::KeyDown {
        key: KeyCode::Shift,
        mods: Modifiers::default(),
        repeat: false,
    });
    assert_eq!(controller.borrow().mode(), NavMode::Pan);

    dispatcher.dispatch(&Event::KeyUp {
        key: KeyCode::Shift,
        mods: Modifiers::default(),
    });
    assert_eq!(controller.borrow().mode(), NavMode::Orbit);
}

#[test]
fn test_wheel_events_drive_camera_through_listener() {
    let mut dispatcher = EventDispatcher::new();
    let controller = controller();
    wire_modifiers(&mut dispatcher, &controller);

    let shared = Rc::clone(&controller);
    dispatcher.register(EventKind::MouseWheel, move |event, _| {
        if let Event::MouseWheel { dx, dy } = *event {
            shared.borrow_mut().on_wheel(dx, dy, 0.016);
        }
    });

    // orbit: distance to pivot preserved
    dispatcher.dispatch(&Event::MouseWheel { dx: 40.0, dy: 0.0 });
    {
        let c = controller.borrow();
        let distance = (c.camera().position() - c.camera().target()).length();
        assert!((distance - 2.0).abs() < 1e-4);
        assert_eq!(c.camera().target(), Vec3::ZERO);
    }

    // hold zoom modifier: wheel now dollies, pivot fixed
    dispatcher.dispatch(&Event::KeyDown {
        key: KeyCode::Ctrl,
        mods: Modifiers::default(),
        repeat: false,
    });
    dispatcher.dispatch(&Event::MouseWheel { dx: 0.0, dy: -5.0 });
    {
        let c = controller.borrow();
        let distance = (c.camera().position() - c.camera().target()).length();
        assert!(distance < 2.0);
        assert_eq!(c.camera().target(), Vec3::ZERO);
    }
}

#[test]
fn test_zero_delta_orbit_view_is_bit_identical() {
    let controller = controller();
    let before = controller.borrow().camera().world_to_view().to_cols_array();

    controller.borrow_mut().on_wheel(0.0, 0.0, 0.016);

    let after = controller.borrow().camera().world_to_view().to_cols_array();
    assert_eq!(before, after);
}
