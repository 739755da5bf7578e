use crate::config::ToolConfig;
use crate::error::{CliError, CliResult};
use bbk_contacts_areacode::PhoneDat;
use bbk_contacts_sdk::{needs_prefix, sanitize_digits, AreaCodeInfo};
use std::path::PathBuf;

/// Show what the area-code database knows about a number
pub fn execute(config: ToolConfig, number: String, area_code_db: Option<PathBuf>) -> CliResult<()> {
    let area_code_db = area_code_db.unwrap_or(config.area_code_db);
    let digits = sanitize_digits(&number);
    if digits.is_empty() {
        return Err(CliError::InvalidNumber(number));
    }

    let dat = PhoneDat::open(&area_code_db)?;
    println!(
        "Database: {} (version {}, {} prefixes)",
        area_code_db.display(),
        dat.version(),
        dat.len()
    );

    let record = dat.find_record(&digits)?;
    match &record {
        Some(record) => {
            println!("Number: {}", record.phone);
            println!("Province: {}", record.province);
            println!("City: {}", record.city);
            println!("Zip code: {}", record.zip_code);
            println!("Area code: {}", record.area_code);
            println!("Carrier: {}", record.carrier);
        }
        None => println!("Number: {} (not found)", digits),
    }

    let info = record.map(AreaCodeInfo::from);
    let prefixed = needs_prefix(info.as_ref(), &config.home_area);
    println!(
        "Long-distance prefix: {} (home {} {})",
        if prefixed { "yes" } else { "no" },
        config.home_area.area_code,
        config.home_area.city
    );

    Ok(())
}
