fn main() {
  if let Err(e) = effortless_eighty::run() {
    eprintln!("Error: {}", e);
    std::process::exit(1);
  }
}
