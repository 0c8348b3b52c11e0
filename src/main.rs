use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    groqchat::cli::main()
}
