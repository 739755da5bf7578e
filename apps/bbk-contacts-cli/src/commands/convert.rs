use crate::config::ToolConfig;
use crate::error::CliResult;
use crate::run_guard::RunGuard;
use bbk_contacts_sdk::{convert_contacts, load_area_codes, ConversionReport, FormatConfig};
use std::path::PathBuf;

/// Per-run overrides from the command line
#[derive(Debug, Default)]
pub struct ConvertArgs {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub area_code_db: Option<PathBuf>,
    /// `Some` when a `--manager`/`--no-manager` flag was given
    pub manager: Option<bool>,
    pub phone: Option<bool>,
    pub sequence: Option<bool>,
}

impl ConvertArgs {
    /// Flags given on the command line win over the config file
    pub fn format(&self, base: FormatConfig) -> FormatConfig {
        FormatConfig {
            include_manager: self.manager.unwrap_or(base.include_manager),
            include_phone: self.phone.unwrap_or(base.include_phone),
            include_sequence: self.sequence.unwrap_or(base.include_sequence),
        }
    }
}

/// Collapse an `--x` / `--no-x` pair into an override
pub fn toggle(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

pub fn execute(config: ToolConfig, args: ConvertArgs) -> CliResult<()> {
    let format = args.format(config.format);
    let input = args.input.unwrap_or(config.input);
    let output = args.output.unwrap_or(config.output);
    let area_code_db = args.area_code_db.unwrap_or(config.area_code_db);

    println!("📇 Converting loan export to BBK contacts");
    println!("Input: {}", input.display());
    println!("Area-code database: {}", area_code_db.display());
    println!("Output: {}", output.display());
    println!(
        "Home area: {} {}",
        config.home_area.area_code, config.home_area.city
    );
    println!("Format: {}", format);

    let _guard = RunGuard::acquire(&output)?;

    let lookup = load_area_codes(&area_code_db)?;
    let report = convert_contacts(&input, &output, lookup, config.home_area, format)?;

    print_report(&report);
    Ok(())
}

fn print_report(report: &ConversionReport) {
    println!("\n🔍 Columns ({}):", report.encoding);
    for (field, header) in report.columns.iter() {
        println!("  - {}: {}", field, header);
    }
    for field in report.columns.missing() {
        println!("  - {}: (not present)", field);
    }

    let stats = &report.stats;
    println!("\n✅ Generated {} records", report.record_count());
    println!("📊 Summary:");
    println!("  - Rows read: {}", stats.rows_read);
    println!(
        "  - Customers: {} (skipped {})",
        stats.customers, stats.customers_skipped
    );
    println!(
        "  - Guarantors: {} (skipped {})",
        stats.guarantors, stats.guarantors_skipped
    );
    println!("  - Format: {}", report.config);
    println!("  - Written to: {}", report.output.display());

    println!();
    for row in &report.contacts {
        println!("{}\t{}", row.name, row.phone_digits());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_flags_keep_config() {
        let base = FormatConfig {
            include_manager: false,
            ..FormatConfig::default()
        };
        assert_eq!(ConvertArgs::default().format(base), base);
    }

    #[test]
    fn test_flags_win_over_config_both_ways() {
        let args = ConvertArgs {
            manager: Some(true),
            phone: Some(false),
            ..ConvertArgs::default()
        };
        let base = FormatConfig {
            include_manager: false,
            include_phone: true,
            include_sequence: false,
        };

        assert_eq!(
            args.format(base),
            FormatConfig {
                include_manager: true,
                include_phone: false,
                include_sequence: false,
            }
        );
    }

    #[test]
    fn test_toggle() {
        assert_eq!(toggle(false, false), None);
        assert_eq!(toggle(true, false), Some(true));
        assert_eq!(toggle(false, true), Some(false));
    }

    #[test]
    fn test_execute_end_to_end_without_database() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("peopleList.csv");
        let output = dir.path().join("名片.csv");
        std::fs::write(&input, "客户姓名,手机号码,客户经理\n张三,13900000000,李四\n").unwrap();

        let args = ConvertArgs {
            input: Some(input),
            output: Some(output.clone()),
            area_code_db: Some(dir.path().join("phone.dat")),
            ..ConvertArgs::default()
        };
        execute(ToolConfig::default(), args).unwrap();

        assert!(output.exists());
        assert!(!dir.path().join("名片.csv.lock").exists());
    }
}
