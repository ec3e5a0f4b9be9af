//! Command-line front end of the chessrules library.
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
#![warn(missing_docs, missing_debug_implementations, unused_extern_crates)]
#![warn(clippy::unimplemented, clippy::todo)]
#![warn(clippy::option_unwrap_used, clippy::result_unwrap_used)]

use std::fs::File;
use std::path::PathBuf;
use clap::{App, Arg, ArgMatches, SubCommand, crate_version};
use log::info;
use rand::Rng;
use simplelog::{WriteLogger, LevelFilter, Config};
use chessrules::{Position, Reason, Variant, CHESS960_POSITIONS};
use chessrules::variations;

const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

fn variant_arg() -> Arg<'static, 'static> {
    Arg::with_name("variant")
        .long("variant")
        .value_name("VARIANT")
        .takes_value(true)
        .possible_values(&["regular", "chess960", "no-king", "white-king-only", "black-king-only"])
        .default_value("regular")
        .help("Rules the positions are played under")
}

fn main() -> Result<(), Error> {
    let matches =
        App::new("chessrules")
            .version(crate_version!())
            .author("Mike Leany")
            .about("Move generation and notation for chess and its variants")
            .arg(Arg::with_name("log")
                .long("log")
                .short("l")
                .global(true)
                .help("Turns on logging"))
            .arg(Arg::with_name("log-file")
                .long("log-file")
                .global(true)
                .value_name("LOG_FILE")
                .takes_value(true)
                .default_value("chessrules.log")
                .help("Sets the log file if logging is turned on"))
            .arg(Arg::with_name("log-level")
                .long("log-level")
                .global(true)
                .value_name("LEVEL")
                .takes_value(true)
                .default_value("info")
                .help("Sets the log level if logging is turned on"))
            .subcommand(SubCommand::with_name("counts")
                .about("Counts the number of variations from a given starting position \
                        to a specified\ndepth. Defaults to the standard starting position.")
                .arg(Arg::with_name("depth")
                    .long("depth")
                    .short("d")
                    .value_name("DEPTH")
                    .takes_value(true)
                    .required(true)
                    .help("Depth to search the position"))
                .arg(variant_arg())
                .arg(Arg::with_name("fen")
                    .value_name("FEN_STRING")
                    .default_value(START_FEN)
                    .hide_default_value(true)
                    .multiple(true)
                    .help("Position to search in Forsyth-Edwards Notation (FEN)")))
            .subcommand(SubCommand::with_name("moves")
                .about("Lists the legal moves of a position in SAN and UCI notation")
                .arg(variant_arg())
                .arg(Arg::with_name("fen")
                    .value_name("FEN_STRING")
                    .default_value(START_FEN)
                    .hide_default_value(true)
                    .help("Position in Forsyth-Edwards Notation (FEN)")))
            .subcommand(SubCommand::with_name("play")
                .about("Plays moves in SAN or UCI notation, then prints the resulting position.\n\
                        Null moves are written `--`, after a first `--` ending the options.")
                .arg(variant_arg())
                .arg(Arg::with_name("fen")
                    .long("fen")
                    .value_name("FEN_STRING")
                    .takes_value(true)
                    .default_value(START_FEN)
                    .hide_default_value(true)
                    .help("Starting position in Forsyth-Edwards Notation (FEN)"))
                .arg(Arg::with_name("moves")
                    .value_name("MOVE")
                    .multiple(true)
                    .help("Moves to play, in order")))
            .subcommand(SubCommand::with_name("chess960")
                .about("Prints the Chess960 starting position with the given Scharnagl code, \
                        or a\nrandom one")
                .arg(Arg::with_name("code")
                    .value_name("CODE")
                    .help("Scharnagl code, from 0 to 959")))
            .get_matches();

    let log_file = PathBuf::from(matches.value_of_os("log-file").expect("INFALLIBLE"));
    let log_level = match matches.value_of("log-level") {
        Some("off") => LevelFilter::Off,
        Some("error") => LevelFilter::Error,
        Some("warn") => LevelFilter::Warn,
        Some("info") => LevelFilter::Info,
        Some("debug") => LevelFilter::Debug,
        Some("trace") => LevelFilter::Trace,
        Some(level) => return Err(Error(format!("{}: invalid log level", level))),
        None => unreachable!(),
    };

    let _logger = if matches.is_present("log") {
        WriteLogger::init(
            log_level,
            Config::default(),
            File::create(&log_file).map_err(|err| {
                Error(format!("{}: {}", log_file.display(), err))
            })?)
    } else {
        WriteLogger::init(LevelFilter::Off, Config::default(), std::io::sink())
    };

    match matches.subcommand() {
        ("counts", Some(matches)) => {
            let depth = matches
                .value_of("depth")
                .expect("INFALLIBLE")
                .parse()
                .map_err(|_| {Error("depth must be numeric".to_owned())})?;
            let variant = variant_of(matches)?;

            println!();
            for fen in matches.values_of("fen").expect("INFALLIBLE") {
                let pos = position(variant, fen)?;
                info!("counting variations of depth {} from {:?}", depth, pos);
                println!("{}", fen);
                let count = variations::print(&pos, depth);
                println!("Depth {} total:\t{:12}\n", depth, count);
            }
        },
        ("moves", Some(matches)) => {
            let fen = matches.value_of("fen").expect("INFALLIBLE");
            let pos = position(variant_of(matches)?, fen)?;
            if !pos.is_legal() {
                return Err(Error(format!("{}: illegal position", pos)));
            }
            for mv in pos.moves() {
                println!("{:8}\t{}", pos.notation(&mv), pos.uci_notation(&mv));
            }
        },
        ("play", Some(matches)) => {
            let fen = matches.value_of("fen").expect("INFALLIBLE");
            let mut pos = position(variant_of(matches)?, fen)?;
            for notation in matches.values_of("moves").into_iter().flatten() {
                if !pos.play_notation(notation) {
                    let message = if notation == "--" {
                        format!("{} in {}", Reason::IllegalNullMove, pos)
                    } else {
                        pos.parse_notation(notation, false)
                            .err()
                            .map_or_else(String::new, |err| err.to_string())
                    };
                    return Err(Error(message));
                }
                info!("played {}", notation);
            }
            println!("{}", pos);
            println!("{}", pos.ascii());
        },
        ("chess960", Some(matches)) => {
            let code = match matches.value_of("code") {
                Some(code) => {
                    code.parse().map_err(|_| {Error("code must be numeric".to_owned())})?
                }
                None => rand::thread_rng().gen_range(0, CHESS960_POSITIONS),
            };
            let pos = Position::chess960(code).map_err(|_| {
                Error(format!("{}: code must be less than {}", code, CHESS960_POSITIONS))
            })?;
            println!("{}\t{}", code, pos);
            println!("{}", pos.ascii());
        },
        _ => {
            println!("{}", matches.usage());
        },
    }

    Ok(())
}

fn variant_of(matches: &ArgMatches<'_>) -> Result<Variant, Error> {
    let variant = matches.value_of("variant").expect("INFALLIBLE");
    variant.parse().map_err(|_| Error(format!("{}: unknown variant", variant)))
}

fn position(variant: Variant, fen: &str) -> Result<Position, Error> {
    Position::from_fen(variant, fen, false)
        .map(|(pos, _)| pos)
        .map_err(|err| Error(err.to_string()))
}

struct Error(String);

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        self.0.fmt(f)
    }
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for Error { }
