//! Module for counting and printing the number of variations from a given position
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use super::*;

/// Print the number of variations of the given `depth` for each legal move from `pos`
pub fn print(pos: &Position, depth: usize) -> usize {
    if depth < 1 {
        return 1;
    }

    let mut total = 0;

    for mv in pos.moves() {
        let mut next = pos.clone();
        next.play(mv);
        let count = count(&next, depth - 1);
        total += count;
        println!("\t{:7}\t{:12}\t{}", pos.notation(&mv), count, next);
    }

    total
}

/// Count the number of variations of the given `depth` from `pos`
pub fn count(pos: &Position, depth: usize) -> usize {
    match depth {
        0 => 1,
        1 => pos.moves().len(),
        _ => pos.moves().into_iter()
            .map(|mv| {
                let mut next = pos.clone();
                next.play(mv);
                count(&next, depth - 1)
            })
            .sum(),
    }
}
