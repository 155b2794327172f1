fn main() {
    let code = php_dispatch::run_cli();
    if code != 0 {
        std::process::exit(code);
    }
}
