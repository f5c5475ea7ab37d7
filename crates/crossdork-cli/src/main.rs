//! crossdork - one set of fields, three search engines.

use anyhow::Result;

fn main() -> Result<()> {
    crossdork_cli::run()
}
