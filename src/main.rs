//! Browser entry point. Build with `--features csr` (e.g. `trunk serve`).

fn main() {
    #[cfg(feature = "csr")]
    client::mount();
}
