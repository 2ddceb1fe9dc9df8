use anyhow::Result;

fn main() -> Result<()> {
    depgraph_cli::main_entry()
}
