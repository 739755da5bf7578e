use crate::config::ToolConfig;
use crate::error::CliResult;
use bbk_contacts_csvs::read_input_csv;
use bbk_contacts_sdk::resolve_columns;
use std::path::PathBuf;

/// Print how an export's headers resolve, without converting anything
pub fn execute(config: ToolConfig, input: Option<PathBuf>) -> CliResult<()> {
    let input = input.unwrap_or(config.input);
    let table = read_input_csv(&input)?;

    println!("Input: {}", input.display());
    println!("Encoding: {}", table.encoding);
    println!("Rows: {}", table.row_count());
    println!("Headers: {}", table.headers.join(", "));

    let columns = resolve_columns(&table.headers);
    println!("\nResolved columns:");
    for (field, header) in columns.iter() {
        println!("  ✅ {}: {}", field, header);
    }
    for field in columns.missing() {
        println!("  ⚠️  {}: not present (accepted: {})", field, field.variants().join(", "));
    }

    Ok(())
}
