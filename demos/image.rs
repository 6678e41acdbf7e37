use code128::Code128;
use image::{GrayImage, Luma};

/// Generate an image which only contains a barcode
fn main() {
    // Width in pixels of one module and height of the bars.
    const N: u32 = 3;
    const HEIGHT: u32 = 80;

    let bars = Code128::encode(b"Hello, World! 0123456789").unwrap().bars();

    // Add the quiet zone on the left and right
    let quiet = code128::QUIET_ZONE as u32;
    let width = (bars.total_width() + 2 * quiet) * N;
    let mut image = GrayImage::from_pixel(width, HEIGHT + 2 * quiet, Luma([255]));
    let mut x = quiet * N;
    for module in bars.modules() {
        for i in 0..module.bar as u32 * N {
            for y in quiet..quiet + HEIGHT {
                image.put_pixel(x + i, y, Luma([0]));
            }
        }
        x += (module.bar + module.space) as u32 * N;
    }

    image.save("code128.png").unwrap();
}
