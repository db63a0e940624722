use std::time::Duration;

use easel_engine::prelude::*;

/// Orbiting circles over a grid, redrawn at roughly 60 Hz.
fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());

    let mut sketch = Sketch::new();
    sketch.create_canvas(
        WinitBackend::new(GpuInit::default()),
        CanvasConfig::new(640, 480).title("easel").background(30),
    )?;
    sketch.wait(Duration::from_millis(16));

    let mut angle = 0.0f32;

    sketch.run_loop(|frame| {
        let (w, h) = (frame.width() as f32, frame.height() as f32);
        let center = Vec2::new(w * 0.5, h * 0.5);

        frame.draw(
            Rect::new(20.0, 20.0, w - 40.0, h - 40.0)
                .fill(Color::rgb(40, 40, 52))
                .stroke(Color::rgb(90, 90, 120))
                .stroke_weight(2.0),
        );

        for i in 1..8 {
            let x = w * i as f32 / 8.0;
            frame.draw(Line::new(x, 0.0, x, h).stroke(60));
        }

        angle += frame.time().dt;
        for k in 0..3 {
            let phase = angle + k as f32 * std::f32::consts::TAU / 3.0;
            let offset = Vec2::new(phase.cos(), phase.sin()) * (h * 0.3);
            let p = center + offset;

            frame.draw(
                Circle::new(p.x, p.y, 24.0)
                    .fill(Color::new(255, 120 + 60 * k as u8, 80, 200))
                    .stroke(Color::WHITE),
            );
        }

        frame.draw(Ellipse::new(center.x, center.y, 60.0, 30.0).fill(Color::new(80, 160, 255, 128)));
    })?;

    log::info!("sketch closed");
    Ok(())
}
