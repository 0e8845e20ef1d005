use super::exit_codes;
use crate::cli::args::ImportArgs;
use anyhow::Result;
use sqlask_core::import::import_csv_file;

pub fn cmd_import(args: ImportArgs) -> Result<i32> {
    println!("Converting {} to SQL...", args.input.display());
    let summary = import_csv_file(&args.db, &args.input, &args.table)?;

    for (name, ty) in &summary.columns {
        println!("  {name} {ty}");
    }
    println!(
        "Conversion complete: {} rows into {}.{}",
        summary.rows,
        args.db.display(),
        summary.table
    );
    Ok(exit_codes::OK)
}
