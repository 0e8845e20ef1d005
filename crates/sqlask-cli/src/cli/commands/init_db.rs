use super::exit_codes;
use crate::cli::args::InitDbArgs;
use anyhow::Result;
use sqlask_core::storage::store::Store;

pub fn cmd_init_db(args: InitDbArgs) -> Result<i32> {
    let store = Store::rebuild(&args.db)?;
    let counts = store.table_counts()?;

    if args.format == "json" {
        println!(
            "{}",
            serde_json::json!({
                "database": args.db.display().to_string(),
                "tables": counts,
            })
        );
    } else {
        println!("Database ready: {}", args.db.display());
        for c in &counts {
            println!("  {}: {} rows", c.table, c.rows);
        }
    }
    Ok(exit_codes::OK)
}
