// What you SEE:
// • The photo fills the window.
// • Hold Left Mouse and draw a loop; letting go closes it and adds it to the
//   selection (ADD) or cuts it out of the selection (SUBTRACT).
// • A/1 add, S/2 subtract, Tab toggles. V cycles overlay / mask / cut-out.
// • R resets, Enter saves <photo>-mask.png and <photo>-cutout.png. ESC quits.

mod canvas;
mod composite;
mod config;
mod draw;
mod error;
mod export;
mod raster;
mod source;
mod types;
mod view;

use canvas::Canvas;
use clap::Parser;
use config::Args;
use draw::{Command, Drawer, draw_crosshair, draw_text_5x7};
use error::Result;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, filter::LevelFilter, prelude::*};
use types::FrameBuffer;
use view::View;

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let args = Args::parse();

    /* --- Photo + canvas + window ---
       Visual: window opens sized to the (possibly scaled down) photo. */
    let photo = source::load_photo(&args.photo, args.max_width, args.max_height)?;
    let (w, h) = photo.dimensions();
    let mut canvas = Canvas::new(w, h);
    canvas.set_source_image(photo);
    canvas.set_operation(args.mode.into());

    let mut drawer = Drawer::new("Crop Tool", w as usize, h as usize)?;
    let mut screen = FrameBuffer::new(w as usize, h as usize);
    let mut view: View = args.view.into();
    let stem = args.output_stem();

    let mut pen_down = false;
    let mut notice: Option<String> = None; // last save result, shown in the HUD

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        /* 1) Keys */
        for cmd in drawer.commands() {
            match cmd {
                Command::SetMode(op) => canvas.set_operation(op),
                Command::ToggleMode => canvas.set_operation(canvas.operation().toggled()),
                Command::CycleView => view = view.next(),
                Command::Reset => {
                    canvas.reset();
                    notice = None;
                    info!("reset");
                }
                Command::Save => {
                    notice = match export::save_outputs(&canvas, &args.out_dir, &stem) {
                        Ok(Some(_)) => Some("SAVED".to_owned()),
                        Ok(None) => Some("NOTHING TO SAVE".to_owned()),
                        Err(e) => {
                            warn!("save failed: {e}");
                            Some("SAVE FAILED".to_owned())
                        }
                    };
                }
            }
        }

        /* 2) Pen: down -> begin, held -> extend, up -> end */
        let down = drawer.left_mouse_down();
        let pos = drawer.mouse_pos();
        match (pen_down, down, pos) {
            (false, true, Some(p)) => canvas.begin_stroke(p),
            (true, true, Some(p)) => canvas.extend_stroke(p),
            (true, false, p) => canvas.end_stroke(p),
            _ => {}
        }
        pen_down = down && (pen_down || pos.is_some());

        /* 3) Picture: chosen view, stroke in progress, crosshair, HUD */
        view::render(&canvas, view, &mut screen);

        if let Some(p) = pos {
            draw_crosshair(&mut screen, p.x as i32, p.y as i32, 10, 0x00_FF_CC_33);
        }

        let mut hud = format!(
            "{} | {} | STROKES: {}",
            canvas.operation().label(),
            view.label(),
            canvas.strokes().len()
        );
        if let Some(n) = &notice {
            hud.push_str(" | ");
            hud.push_str(n);
        }
        draw_text_5x7(&mut screen, 8, 8, &hud, 0x00_FF_FF_FF);

        /* 4) Present */
        drawer.present(&screen)?;
    }

    Ok(())
}
