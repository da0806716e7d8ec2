/// Scripted picker session for native builds.
///
/// Usage: `huewheel-demo [config.json] [#rrggbb]`
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::time::Duration;

    use huewheel::{
        Bounds, ColorChange, ColorPicker, ColorUpdate, GestureSample, Hsv, Orientation,
        PickerConfig,
    };

    enum DemoMessage {
        Changed(String),
        Committed(String),
    }

    const FRAME: Duration = Duration::from_millis(16);
    const WHEEL: Bounds = Bounds {
        x: 20.0,
        y: 20.0,
        width: 300.0,
        height: 300.0,
    };

    let mut args = std::env::args().skip(1);
    let (mut config, load_error) = match args.next() {
        Some(path) => match PickerConfig::load_from_path(&path) {
            Ok(config) => (config, None),
            Err(e) => (PickerConfig::default(), Some((path, e))),
        },
        None => (PickerConfig::default(), None),
    };

    env_logger::Builder::new()
        .filter_level(config.log_level.to_level_filter())
        .parse_default_env()
        .init();

    if let Some((path, e)) = load_error {
        log::warn!("Could not load {}: {}, using defaults", path, e);
    }
    if let Some(Err(e)) = args.next().map(|hex| config.set_initial_color(&hex)) {
        log::warn!("{}", e);
    }

    let mut picker = ColorPicker::new(&config)
        .on_color_change(|change: ColorChange| DemoMessage::Changed(change.hex))
        .on_color_change_complete(|change: ColorChange| DemoMessage::Committed(change.hex));

    let track = match picker.orientation() {
        Orientation::Horizontal => {
            Bounds::new(WHEEL.x, WHEEL.y + WHEEL.height + 20.0, WHEEL.width, 40.0)
        }
        Orientation::Vertical => {
            Bounds::new(WHEEL.x + WHEEL.width + 20.0, WHEEL.y, 40.0, WHEEL.height)
        }
    };
    picker.on_wheel_layout(WHEEL);
    picker.on_track_layout(track);
    log::info!("Picker ready with {}", picker.hex());

    let report = |messages: Vec<DemoMessage>| {
        for message in messages {
            match message {
                DemoMessage::Changed(hex) => log::info!("changed   {}", hex),
                DemoMessage::Committed(hex) => log::info!("committed {}", hex),
            }
        }
    };

    // Circle the wheel at half radius, then drift out to the edge and release
    let center = WHEEL.center();
    let radius = WHEEL.width / 2.0;
    let mut samples = vec![GestureSample::start(center.x + radius * 0.5, center.y)];
    for step in 1..=12 {
        let angle = (step as f32 * 30.0).to_radians();
        samples.push(GestureSample::moved(
            center.x + radius * 0.5 * angle.cos(),
            center.y - radius * 0.5 * angle.sin(),
        ));
    }
    samples.push(GestureSample::moved(center.x + radius * 0.97, center.y));
    samples.push(GestureSample::end(center.x + radius * 0.97, center.y));
    for sample in samples {
        report(picker.on_gesture(sample));
    }

    // Slide the value track from its top end to the middle
    let along = |offset: f32| match picker.orientation() {
        Orientation::Horizontal => (track.x + offset, track.y + 20.0),
        Orientation::Vertical => (track.x + 20.0, track.y + offset),
    };
    let ((x0, y0), (x1, y1)) = (along(5.0), along(130.0));
    report(picker.on_gesture(GestureSample::start(x0, y0)));
    report(picker.on_gesture(GestureSample::moved(x1, y1)));
    report(picker.on_gesture(GestureSample::end(x1, y1)));

    // Animate to a new color and back
    report(picker.animate_color(ColorUpdate::new(Hsv::new(210.0, 80.0, 90.0))));
    report(picker.revert());

    let mut frames = 0;
    while picker.advance(FRAME) {
        frames += 1;
    }
    let thumb = picker.wheel_thumb();
    log::info!(
        "Settled after {} frames: {} (wheel thumb at {:.1}, {:.1}, track thumb at {:.1})",
        frames,
        picker.hex(),
        thumb.x,
        thumb.y,
        picker.track_thumb()
    );
}

// WASM hosts drive the picker directly through the library
#[cfg(target_arch = "wasm32")]
fn main() {}
