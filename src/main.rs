fn main() {
    if let Err(err) = voc2yolo::run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
