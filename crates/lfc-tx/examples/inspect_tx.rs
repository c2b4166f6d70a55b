//! Simple decoder to inspect encoded LFC transactions.
//!
//! ```text
//! cargo run --example inspect_tx -- tx.bin [v1|v2]
//! RUST_LOG=lfc_tx=trace cargo run --example inspect_tx
//! ```
//!
//! Without a file argument a sample transaction is built and inspected.

use std::error::Error;
use std::fs;

use lfc_tx::resolver::tree_with_schema;
use lfc_tx::{
    Input, Output, SchemaVersion, TransactionBuilder, compute_cid, decode_transaction_with_schema,
    validate,
};
use tracing_subscriber::EnvFilter;

fn sample_bytes() -> Result<Vec<u8>, Box<dyn Error>> {
    let hash = "0".repeat(64);
    let tx = TransactionBuilder::new(hash.clone(), 1_600_000_000_000)
        .reward("minted")
        .input(Input::new(0, hash.clone(), 150, hash.clone(), "deadbeef"))
        .output(Output::new(0, 150, hash))
        .build();
    Ok(tx.serialize()?)
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let data = match args.next() {
        Some(path) => {
            println!("Reading: {}", path);
            fs::read(&path)?
        }
        None => {
            println!("Reading: <built-in sample>");
            sample_bytes()?
        }
    };
    let schema = match args.next().as_deref() {
        Some("v1") => SchemaVersion::V1,
        _ => SchemaVersion::V2,
    };
    println!("File size: {} bytes", data.len());

    let tx = decode_transaction_with_schema(&data, schema)?;

    println!("\n=== Transaction ({:?}) ===", schema);
    println!("{}", tx);
    println!("CID: {}", compute_cid(&data));
    match validate(&tx) {
        Ok(()) => println!("Valid: yes"),
        Err(err) => println!("Valid: no ({})", err),
    }

    println!("\n=== Inputs ({}) ===", tx.inputs().len());
    for input in tx.inputs() {
        println!("  {}", input);
    }

    println!("\n=== Outputs ({}) ===", tx.outputs().len());
    for output in tx.outputs() {
        println!("  {}", output);
    }

    println!("\n=== Paths ===");
    for path in tree_with_schema(&data, schema)? {
        println!("  {}", path);
    }

    Ok(())
}
