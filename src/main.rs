//! コマンドラインからのネゴシエーション
//!
//! 使い方: negotiate [--json] [--specs] <ACCEPT> [CANDIDATE...]

use std::env;
use std::process;
use env_logger::Env;
use log::{debug, error};

use negotiator::{Error, Negotiator};
use negotiator::negotiation::sort_by_preference;

const USAGE: &str = "Usage: negotiate [--json] [--specs] <ACCEPT> [CANDIDATE...]";

/// コマンドライン引数
#[derive(Debug, Default)]
struct Args {
    json: bool,
    specs: bool,
    accept: String,
    candidates: Vec<String>,
}

/// 引数をパースする。ACCEPTがなければNone
fn parse_args(args: impl Iterator<Item = String>) -> Option<Args> {
    let mut parsed = Args::default();
    let mut positional = Vec::new();

    for arg in args {
        match arg.as_str() {
            "--json" => parsed.json = true,
            "--specs" => parsed.specs = true,
            _ => positional.push(arg),
        }
    }

    let mut positional = positional.into_iter();
    parsed.accept = positional.next()?;
    parsed.candidates = positional.collect();
    Some(parsed)
}

/// 引数に従って出力文字列を組み立てる
///
/// `--specs` の場合も `negotiate` と同じ上限検査を通す。
fn render(args: &Args, negotiator: &Negotiator) -> Result<String, Error> {
    if args.specs {
        let mut specs = negotiator.parse_accept(&args.accept)?;
        sort_by_preference(&mut specs);
        return serde_json::to_string_pretty(&specs).map_err(|e| Error::SerializationError(e.to_string()));
    }

    let types = negotiator.negotiate(&args.accept, &args.candidates)?;
    if args.json {
        serde_json::to_string(&types).map_err(|e| Error::SerializationError(e.to_string()))
    } else {
        Ok(types.join("\n"))
    }
}

fn main() {
    // 標準出力は結果用なのでログは標準エラー出力に出す
    env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    let Some(args) = parse_args(env::args().skip(1)) else {
        eprintln!("{}", USAGE);
        process::exit(2);
    };
    debug!("Parsed arguments: {:?}", args);

    let negotiator = Negotiator::from_env();
    match render(&args, &negotiator) {
        Ok(output) if output.is_empty() => {}
        Ok(output) => println!("{}", output),
        Err(e) => {
            error!("Negotiation failed: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
