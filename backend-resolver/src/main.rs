#![deny(warnings, rust_2018_idioms)]
#![forbid(unsafe_code)]

fn main() -> anyhow::Result<()> {
    ingress_backend_resolver::Args::parse_and_run()
}
