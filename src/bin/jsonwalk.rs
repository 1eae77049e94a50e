fn main() {
    jsonwalk::cli::main();
}
