#![forbid(unsafe_code)]

//! `letterboard-ctl`: local CLI companion for `letterboard`.
//!
//! Connects to the line transport and speaks newline-delimited JSON.
//! Every invocation is its own client: locks it takes are released when
//! the command exits.

use std::io::{BufRead, BufReader, Write};
use std::net::TcpStream;

use clap::{Parser, Subcommand};
use serde_json::{json, Value};

type CtlResult<T> = std::result::Result<T, Box<dyn std::error::Error>>;

#[derive(Debug, Parser)]
#[command(
    name = "letterboard-ctl",
    about = "Local CLI for the letterboard server",
    version,
    long_about = None
)]
struct Cli {
    /// Address of the server's line transport.
    ///
    /// The server only opens it when `lines_port` is set; the default
    /// matches a config containing `lines_port = 3001`.
    #[arg(long, default_value = "127.0.0.1:3001")]
    addr: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the current board snapshot.
    Snapshot,

    /// Print every event until the server closes the connection.
    Watch,

    /// Lock a block and hold it until Enter is pressed.
    Lock {
        /// Block id.
        block_id: u32,
    },

    /// Lock a block, move it toward a cell, and report where it landed.
    Move {
        /// Block id.
        block_id: u32,
        /// Target row.
        row: i64,
        /// Target column.
        col: i64,
    },
}

fn main() {
    let args = Cli::parse();
    if let Err(err) = run(&args) {
        eprintln!("Error: {err}");
        eprintln!(
            "Is letterboard running with `lines_port` set for {}?",
            args.addr
        );
        std::process::exit(1);
    }
}

fn run(args: &Cli) -> CtlResult<()> {
    let stream = TcpStream::connect(&args.addr)?;
    let mut writer = stream.try_clone()?;
    let mut reader = BufReader::new(stream);

    let initial = read_event(&mut reader)?;

    match args.command {
        Command::Snapshot => {
            println!("{}", serde_json::to_string_pretty(&initial["data"])?);
        }
        Command::Watch => {
            println!("{initial}");
            while let Ok(event) = read_event(&mut reader) {
                println!("{event}");
            }
        }
        Command::Lock { block_id } => {
            lock(&mut writer, &mut reader, block_id)?;
            println!("block {block_id} locked; press Enter to release");
            let mut line = String::new();
            std::io::stdin().read_line(&mut line)?;
            send(&mut writer, &json!({ "type": "unlockBlock", "blockId": block_id }))?;
        }
        Command::Move { block_id, row, col } => {
            lock(&mut writer, &mut reader, block_id)?;
            send(
                &mut writer,
                &json!({ "type": "moveBlock", "blockId": block_id, "row": row, "col": col }),
            )?;
            let placed = await_outcome(&mut reader, block_id, "blockPlaced", "error")?;
            println!(
                "block {block_id} placed at ({}, {})",
                placed["data"]["row"], placed["data"]["col"]
            );
        }
    }

    Ok(())
}

fn lock(writer: &mut TcpStream, reader: &mut BufReader<TcpStream>, block_id: u32) -> CtlResult<()> {
    send(writer, &json!({ "type": "lockBlock", "blockId": block_id }))?;
    await_outcome(reader, block_id, "blockLocked", "lockFailed")?;
    Ok(())
}

/// Skip unrelated events until `success` or `failure` arrives for `block_id`.
fn await_outcome(
    reader: &mut BufReader<TcpStream>,
    block_id: u32,
    success: &str,
    failure: &str,
) -> CtlResult<Value> {
    loop {
        let event = read_event(reader)?;
        let name = event["event"].as_str().unwrap_or_default();
        let data = &event["data"];
        // `blockPlaced` carries the whole block, so its id field is `id`.
        let id = data
            .get("blockId")
            .or_else(|| data.get("id"))
            .and_then(Value::as_u64);
        if id != Some(u64::from(block_id)) {
            continue;
        }
        if name == success {
            return Ok(event);
        }
        if name == failure {
            let message = data["message"].as_str().unwrap_or("request failed");
            return Err(message.into());
        }
    }
}

fn send(writer: &mut TcpStream, request: &Value) -> CtlResult<()> {
    let mut line = serde_json::to_string(request)?;
    line.push('\n');
    writer.write_all(line.as_bytes())?;
    writer.flush()?;
    Ok(())
}

fn read_event(reader: &mut BufReader<TcpStream>) -> CtlResult<Value> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Err("server closed the connection".into());
    }
    Ok(serde_json::from_str(line.trim())?)
}
