//! Headless capture: PNG screenshots.

use std::error::Error;
use std::fs;
use std::path::Path;

use crate::Atari2600;

/// Save the current framebuffer as a PNG file.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn save_screenshot(atari: &Atari2600, path: &Path) -> Result<(), Box<dyn Error>> {
    let width = atari.framebuffer_width();
    let height = atari.framebuffer_height();
    let fb = atari.framebuffer();

    let file = fs::File::create(path)?;
    let w = std::io::BufWriter::new(file);
    let mut encoder = png::Encoder::new(w, width, height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;

    // Convert ARGB32 to RGBA bytes.
    let mut rgba = Vec::with_capacity((width * height * 4) as usize);
    for &pixel in &fb {
        rgba.push(((pixel >> 16) & 0xFF) as u8);
        rgba.push(((pixel >> 8) & 0xFF) as u8);
        rgba.push((pixel & 0xFF) as u8);
        rgba.push(0xFF);
    }

    writer.write_image_data(&rgba)?;
    Ok(())
}

/// Record video: run frames and dump each as a PNG.
///
/// # Errors
///
/// Returns an error if frames cannot be saved or the CPU faults.
pub fn record(atari: &mut Atari2600, dir: &Path, num_frames: u32) -> Result<(), Box<dyn Error>> {
    let frames_dir = dir.join("frames");
    fs::create_dir_all(&frames_dir)?;

    for i in 1..=num_frames {
        if atari.run_frame()? == crate::FrameResult::Quit {
            break;
        }
        let filename = frames_dir.join(format!("{i:06}.png"));
        save_screenshot(atari, &filename)?;
    }

    eprintln!("Captured {num_frames} frames to {}", frames_dir.display());
    Ok(())
}
