use std::env;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use dmpgen_generate::output::script::write_seed_script;
use dmpgen_generate::{GenerateOptions, GenerationEngine, ScriptTarget};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut args = env::args().skip(1);
    let mut options = GenerateOptions::default();
    let mut out: Option<PathBuf> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--datasets" => {
                options.datasets = args.next().ok_or("missing --datasets value")?.parse()?;
            }
            "--seed" => options.seed = Some(args.next().ok_or("missing --seed value")?.parse()?),
            "--out" => out = args.next().map(PathBuf::from),
            _ => return Err(format!("unexpected argument '{arg}'").into()),
        }
    }

    let out = out.unwrap_or_else(|| PathBuf::from("mongo_insert.js"));
    let result = GenerationEngine::new(options).run()?;
    let writer = BufWriter::new(File::create(&out)?);
    let bytes = write_seed_script(writer, &ScriptTarget::default(), &result.catalog.records)?;

    println!("seed={} bytes={} out={}", result.seed, bytes, out.display());
    Ok(())
}
