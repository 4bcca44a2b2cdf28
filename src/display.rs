//! Console table of DHCP leases.
//!
//! Every column is right-justified to the longest value in that column,
//! columns are separated by a single space. There is no header line.

use std::fmt::Display;
use std::io::{self, Write};

use owo_colors::OwoColorize;

use crate::dhcp::{Lease, LeaseTable, FIELDS_PER_RECORD};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Style {
    /// No escape sequences at all
    Plain,
    /// Name in green, IP in yellow, the rest uncolored. Each colored field is
    /// closed with `ESC[39m` (default foreground), not a full `ESC[0m` reset.
    #[default]
    Colored,
}

/// Column widths in characters, in [`Lease::fields`] order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Widths([usize; FIELDS_PER_RECORD]);

impl Widths {
    pub fn of(table: &LeaseTable) -> Widths {
        let mut widths = [0usize; FIELDS_PER_RECORD];
        for lease in table {
            for (width, field) in widths.iter_mut().zip(lease.fields()) {
                *width = (*width).max(field.chars().count());
            }
        }
        Widths(widths)
    }

    pub fn get(&self, column: usize) -> usize {
        self.0[column]
    }
}

fn write_fields<W, N, I>(
    w: &mut W,
    widths: &Widths,
    name: N,
    ip: I,
    rest: [&str; 3],
) -> io::Result<()>
where
    W: Write,
    N: Display,
    I: Display,
{
    let [w_name, w_ip, w_mac, w_lease, w_client_id] = widths.0;
    let [mac, lease, client_id] = rest;
    writeln!(
        w,
        "{:>w_name$} {:>w_ip$} {:>w_mac$} {:>w_lease$} {:>w_client_id$}",
        name, ip, mac, lease, client_id
    )
}

fn write_line<W: Write>(w: &mut W, lease: &Lease, widths: &Widths, style: Style) -> io::Result<()> {
    let [name, ip, mac, lease, client_id] = lease.fields();
    let rest = [mac, lease, client_id];

    // padding goes inside the color so both styles line up the same
    match style {
        Style::Plain => write_fields(w, widths, name, ip, rest),
        Style::Colored => write_fields(w, widths, name.green(), ip.yellow(), rest),
    }
}

/// Write one line per lease to `w`.
pub fn render_to<W: Write>(w: &mut W, table: &LeaseTable, style: Style) -> io::Result<()> {
    let widths = Widths::of(table);
    for lease in table {
        write_line(w, lease, &widths, style)?;
    }
    Ok(())
}

pub fn render(table: &LeaseTable, style: Style) -> io::Result<String> {
    let mut out = Vec::new();
    render_to(&mut out, table, style)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}

pub fn print(table: &LeaseTable, style: Style) -> io::Result<()> {
    let stdout = io::stdout();
    let mut lock = stdout.lock();
    render_to(&mut lock, table, style)?;
    lock.flush()
}
