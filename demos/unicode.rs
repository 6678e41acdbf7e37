use code128::Code128;

fn main() {
    let text = std::env::args().nth(1).unwrap_or_else(|| "Code 128".to_owned());
    match Code128::encode_str(&text) {
        Ok(code) => {
            println!("{}", code.unicode());
            println!("{:?}", code.symbols());
        }
        Err(err) => eprintln!("{}", err),
    }
}
