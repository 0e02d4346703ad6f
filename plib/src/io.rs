//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the pomo project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// Open a file for reading, or stdin when the path is "-".
pub fn input_stream(pathname: &Path) -> io::Result<Box<dyn Read>> {
    let file: Box<dyn Read> = if pathname.as_os_str() == "-" {
        Box::new(io::stdin().lock())
    } else {
        Box::new(fs::File::open(pathname)?)
    };

    Ok(file)
}

/// Read an entire input (file or "-") into memory.
pub fn read_input(pathname: &Path) -> io::Result<Vec<u8>> {
    let mut data = Vec::new();
    input_stream(pathname)?.read_to_end(&mut data)?;
    Ok(data)
}
