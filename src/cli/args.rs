use clap::Parser;

use crate::utils::formatting::ReceiptFormat;

#[derive(Parser, Debug)]
#[command(name = "stationery-order")]
#[command(about = "Take a stationery order at the console and print the receipt")]
#[command(version = "0.1.0")]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Maximum number of products per order (overrides SHOP_SELECTION_LIMIT)
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub limit: Option<u32>,

    /// Receipt format printed when the order is finished
    #[arg(short, long, value_enum, default_value_t = ReceiptFormat::Plain)]
    pub format: ReceiptFormat,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Read answers line by line from stdin even on a terminal
    #[arg(long)]
    pub script: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["stationery-order"]).unwrap();

        assert!(!args.verbose);
        assert_eq!(args.limit, None);
        assert_eq!(args.format, ReceiptFormat::Plain);
        assert!(!args.no_color);
        assert!(!args.script);
    }

    #[test]
    fn test_all_flags() {
        let args = Args::try_parse_from([
            "stationery-order",
            "-v",
            "--limit",
            "5",
            "--format",
            "json",
            "--no-color",
            "--script",
        ])
        .unwrap();

        assert!(args.verbose);
        assert_eq!(args.limit, Some(5));
        assert_eq!(args.format, ReceiptFormat::Json);
        assert!(args.no_color);
        assert!(args.script);
    }

    #[test]
    fn test_zero_limit_rejected() {
        assert!(Args::try_parse_from(["stationery-order", "--limit", "0"]).is_err());
    }

    #[test]
    fn test_unknown_format_rejected() {
        assert!(Args::try_parse_from(["stationery-order", "--format", "pdf"]).is_err());
    }
}
