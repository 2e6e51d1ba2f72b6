use anyhow::Result;
use matmul_bench_charts::chart::generate_charts;
use matmul_bench_charts::results::BenchmarkResults;
use std::path::Path;

fn main() -> Result<()> {
    let data = BenchmarkResults::load(Path::new("data.json"))?;
    generate_charts(&data, Path::new("graphs"))?;

    println!("\nChart generation complete!");
    Ok(())
}
