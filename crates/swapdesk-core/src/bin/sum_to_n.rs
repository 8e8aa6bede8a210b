//! # Sum to N
//!
//! Runs every summation variant for one `n` and prints them side by side.
//!
//! ## Usage
//! ```bash
//! # Default n = 888
//! cargo run -p swapdesk-core --bin sum_to_n
//!
//! cargo run -p swapdesk-core --bin sum_to_n -- 10000
//! ```

use std::env;

use anyhow::Context;
use swapdesk_core::arithmetic::{parse_n, sum_all};

const DEFAULT_N: i64 = 888;

fn main() -> anyhow::Result<()> {
    let n = match env::args().nth(1) {
        Some(raw) => parse_n(&raw).with_context(|| format!("'{}' is not a valid n", raw))?,
        None => DEFAULT_N,
    };

    let results = sum_all(n).with_context(|| format!("summing 1..={}", n))?;

    println!("sum_to_n({})", n);
    for (imp, sum) in results {
        println!(
            "  {:<22} {:>6} time  {:>6} space  = {}",
            imp.name, imp.time_complexity, imp.space_complexity, sum
        );
        println!("  {:<22} {}", "", imp.description);
    }

    Ok(())
}
