use clap::Parser;

use rref_rs::Mat;

/// Reduce a dense matrix to reduced row-echelon form
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Number of rows
    #[arg(short, long)]
    rows: isize,
    /// Tolerance below which entries are treated as zero
    #[arg(short, long, default_value_t = Mat::EPS)]
    eps: f64,
    /// Matrix entries in row-major order
    #[arg(allow_negative_numbers = true)]
    values: Vec<f64>,
}

fn main() {
    let args = Args::parse();

    let Some(mut m) = Mat::from_vector(&args.values, args.rows) else {
        eprintln!("row count must be non-negative");
        std::process::exit(1);
    };
    println!("{m}");

    if let Err(e) = m.row_reduce_with(args.eps) {
        eprintln!("reduction failed: {e}");
        std::process::exit(1);
    }
    println!("\nreduced:\n{m}");
}
