use code128::{Code128, Geometry};

fn to_svg(code: &Code128) -> String {
    // leave a quiet zone of ten modules on both sides
    let quiet = code128::QUIET_ZONE as f64;
    let width = code.bars().total_width() as f64;
    let geometry = Geometry::new().at(quiet, quiet).with_height(40.0);
    let path = code.path(&geometry).unwrap();
    format!(
        concat!(
            "<?xml version=\"1.0\"?>",
            "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {} {}\">",
            "<path d=\"{}\"/></svg>",
        ),
        width + 2.0 * quiet,
        40.0 + 2.0 * quiet,
        path
    )
}

fn main() {
    let code = Code128::encode(b"Hello, SVG!").unwrap();
    println!("{}", to_svg(&code));
}
