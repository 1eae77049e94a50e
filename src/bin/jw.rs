//! Short alias for the `jsonwalk` binary.
fn main() {
    jsonwalk::cli::main();
}
