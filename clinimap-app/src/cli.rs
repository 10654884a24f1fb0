use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "clinimap-app")]
#[command(about = "Render a facility map and list what is nearby")]
#[command(version)]
pub struct Args {
    // Data
    /// JSON file with facility records (built-in Seoul/Busan set if omitted)
    #[arg(long)]
    pub facilities: Option<PathBuf>,

    /// JSON file with map options
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Category to show, or "all"
    #[arg(long, default_value = "all")]
    pub filter: String,

    // Surface
    /// Surface width in pixels (overrides config)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub width: Option<u32>,

    /// Surface height in pixels (overrides config)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub height: Option<u32>,

    // Location
    /// Pretend the user is at "lat,lng"
    #[arg(long, value_parser = parse_pair, conflicts_with = "locate_fail")]
    pub locate: Option<(f64, f64)>,

    /// Simulate a denied location request
    #[arg(long)]
    pub locate_fail: bool,

    // Interaction
    /// Click at surface pixel "x,y"; may be repeated
    #[arg(long, value_parser = parse_pair)]
    pub click: Vec<(f64, f64)>,

    /// Select a facility by id, as from the list
    #[arg(long)]
    pub select: Option<u64>,

    /// Print a directions link for the selected facility
    #[arg(long)]
    pub directions: bool,

    // Output
    /// Where to write the rendered PNG
    #[arg(long, default_value = "map.png")]
    pub out: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

fn parse_pair(value: &str) -> Result<(f64, f64), String> {
    let (first, second) = value
        .split_once(',')
        .ok_or_else(|| format!("expected two comma-separated numbers, got {:?}", value))?;
    let first = first
        .trim()
        .parse::<f64>()
        .map_err(|err| format!("{:?}: {}", first, err))?;
    let second = second
        .trim()
        .parse::<f64>()
        .map_err(|err| format!("{:?}: {}", second, err))?;
    Ok((first, second))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pair() {
        assert_eq!(parse_pair("37.5, 127.0"), Ok((37.5, 127.0)));
        assert!(parse_pair("37.5").is_err());
        assert!(parse_pair("a,b").is_err());
    }

    #[test]
    fn test_args_parse() {
        let args = Args::parse_from([
            "clinimap-app",
            "--filter",
            "clinic",
            "--locate",
            "35.1,129.0",
            "--click",
            "400,300",
            "--click",
            "10,10",
        ]);
        assert_eq!(args.filter, "clinic");
        assert_eq!(args.locate, Some((35.1, 129.0)));
        assert_eq!(args.click.len(), 2);
        assert_eq!(args.out, PathBuf::from("map.png"));
    }
}
