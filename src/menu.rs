//! The console menu that drives a [`CarRegistry`].
//!
//! Input is consumed as whitespace separated tokens, so a car number or an owner name is a single
//! word, and several answers may be typed on one line. Everything the registry reports is turned
//! into a line of text here; the registry itself never writes anything.

use std::{
    collections::VecDeque,
    fmt,
    io::{self, BufRead, Write},
    str::FromStr,
};

use log::{debug, info};

use crate::{CarRecord, CarRegistry};

/// One entry of the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Park,
    Remove,
    DisplayForward,
    DisplayBackward,
    Exit,
}

/// A menu choice that is not one of the listed numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidChoice(String);

impl fmt::Display for InvalidChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid menu choice {:?}", self.0)
    }
}

impl std::error::Error for InvalidChoice {}

impl FromStr for Command {
    type Err = InvalidChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<i64>() {
            Ok(1) => Ok(Self::Park),
            Ok(2) => Ok(Self::Remove),
            Ok(3) => Ok(Self::DisplayForward),
            Ok(4) => Ok(Self::DisplayBackward),
            Ok(5) => Ok(Self::Exit),
            _ => Err(InvalidChoice(s.to_owned())),
        }
    }
}

/// Splits a reader into whitespace separated words, pulling in a new line only when the words of
/// the previous one are used up.
pub struct Tokens<R> {
    reader: R,
    pending: VecDeque<String>,
}

impl<R: BufRead> Tokens<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
        }
    }

    /// The next word, or `None` once the input is exhausted.
    pub fn next_token(&mut self) -> io::Result<Option<String>> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(Some(token));
            }

            // bytes that are not UTF-8 become U+FFFD and end up as an unrecognised word
            let mut line = Vec::new();
            if self.reader.read_until(b'\n', &mut line)? == 0 {
                return Ok(None);
            }
            self.pending.extend(
                String::from_utf8_lossy(&line)
                    .split_whitespace()
                    .map(str::to_owned),
            );
        }
    }
}

#[derive(Clone, Copy)]
enum Order {
    FrontToEnd,
    EndToFront,
}

pub struct Menu<R, W> {
    tokens: Tokens<R>,
    out: W,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(input: R, out: W) -> Self {
        Self {
            tokens: Tokens::new(input),
            out,
        }
    }

    /// Asks for the capacity of the lot until a non-negative number is given. `None` if the input
    /// ends first.
    pub fn read_capacity(&mut self) -> io::Result<Option<usize>> {
        loop {
            let Some(token) = self.prompt("Enter Parking Lot Capacity: ")? else {
                return Ok(None);
            };
            match token.parse::<usize>() {
                Ok(capacity) => return Ok(Some(capacity)),
                Err(_) => {
                    writeln!(self.out, "Invalid capacity. Please enter a non-negative number.")?
                }
            }
        }
    }

    /// Shows the menu and carries out choices until `Exit` is chosen or the input ends.
    pub fn run(&mut self, registry: &mut CarRegistry) -> io::Result<()> {
        loop {
            self.write_menu()?;
            let Some(token) = self.prompt("Enter your choice: ")? else {
                info!("input closed, leaving the menu");
                return Ok(());
            };

            let command = match token.parse::<Command>() {
                Ok(command) => command,
                Err(err) => {
                    debug!("{err}");
                    writeln!(self.out, "Invalid choice. Please try again.")?;
                    continue;
                }
            };

            let carry_on = match command {
                Command::Park => self.park(registry)?,
                Command::Remove => self.remove(registry)?,
                Command::DisplayForward => {
                    self.display(registry, Order::FrontToEnd)?;
                    true
                }
                Command::DisplayBackward => {
                    self.display(registry, Order::EndToFront)?;
                    true
                }
                Command::Exit => {
                    writeln!(self.out, "Exiting Parking Lot System.")?;
                    false
                }
            };
            if !carry_on {
                return Ok(());
            }
        }
    }

    pub fn into_output(self) -> W {
        self.out
    }

    fn write_menu(&mut self) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "=== Parking Lot Menu ===")?;
        writeln!(self.out, "1. Park Car")?;
        writeln!(self.out, "2. Remove Car")?;
        writeln!(self.out, "3. Display Cars (Front → End)")?;
        writeln!(self.out, "4. Display Cars (End → Front)")?;
        writeln!(self.out, "5. Exit")
    }

    fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        write!(self.out, "{message}")?;
        self.out.flush()?;
        self.tokens.next_token()
    }

    /// Returns `false` when the input ended halfway through.
    fn park(&mut self, registry: &mut CarRegistry) -> io::Result<bool> {
        let Some(car_number) = self.prompt("Enter Car Number: ")? else {
            return Ok(false);
        };
        let Some(owner_name) = self.prompt("Enter Owner Name: ")? else {
            return Ok(false);
        };

        match registry.park(car_number.as_str(), owner_name) {
            Ok(()) => writeln!(self.out, "Car {car_number} parked successfully.")?,
            Err(full) => writeln!(self.out, "Parking Lot Full! Cannot park {}", full.car_number())?,
        }
        Ok(true)
    }

    /// Returns `false` when the input ended halfway through.
    fn remove(&mut self, registry: &mut CarRegistry) -> io::Result<bool> {
        let Some(car_number) = self.prompt("Enter Car Number to Remove: ")? else {
            return Ok(false);
        };

        if registry.is_empty() {
            writeln!(self.out, "Parking Lot is empty.")?;
            return Ok(true);
        }

        match registry.remove(&car_number) {
            Ok(()) => writeln!(self.out, "Car {car_number} removed successfully.")?,
            Err(not_found) => writeln!(self.out, "Car {} not found.", not_found.car_number())?,
        }
        Ok(true)
    }

    fn display(&mut self, registry: &CarRegistry, order: Order) -> io::Result<()> {
        if registry.is_empty() {
            return writeln!(self.out, "Parking Lot is empty.");
        }

        match order {
            Order::FrontToEnd => {
                writeln!(self.out, "Cars in Parking Lot (Front → End):")?;
                self.write_records(registry.list_forward())
            }
            Order::EndToFront => {
                writeln!(self.out, "Cars in Parking Lot (End → Front):")?;
                self.write_records(registry.list_backward())
            }
        }
    }

    fn write_records<'a>(
        &mut self,
        records: impl Iterator<Item = &'a CarRecord>,
    ) -> io::Result<()> {
        for record in records {
            writeln!(self.out, "{record}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn session(capacity: usize, input: &str) -> (CarRegistry, String) {
        let mut registry = CarRegistry::new(capacity);
        let mut menu = Menu::new(Cursor::new(input.as_bytes()), Vec::new());
        menu.run(&mut registry).unwrap();
        let output = String::from_utf8(menu.into_output()).unwrap();
        (registry, output)
    }

    #[test]
    fn choices_parse() {
        assert_eq!("1".parse(), Ok(Command::Park));
        assert_eq!("2".parse(), Ok(Command::Remove));
        assert_eq!("3".parse(), Ok(Command::DisplayForward));
        assert_eq!("4".parse(), Ok(Command::DisplayBackward));
        assert_eq!("5".parse(), Ok(Command::Exit));
        assert!("0".parse::<Command>().is_err());
        assert!("6".parse::<Command>().is_err());
        assert!("park".parse::<Command>().is_err());
    }

    #[test]
    fn tokens_span_lines() {
        let mut tokens = Tokens::new(Cursor::new("1  A1\n\n   Alice\t2\n".as_bytes()));
        let mut seen = Vec::new();
        while let Some(token) = tokens.next_token().unwrap() {
            seen.push(token);
        }
        assert_eq!(seen, vec!["1", "A1", "Alice", "2"]);
    }

    #[test]
    fn full_lot_transcript() {
        let (registry, output) = session(2, "1 A1 Alice\n1 B2 Bob\n1 C3 Carol\n2 A1\n3\n4\n5\n");

        assert!(output.contains("Car A1 parked successfully.\n"));
        assert!(output.contains("Car B2 parked successfully.\n"));
        assert!(output.contains("Parking Lot Full! Cannot park C3\n"));
        assert!(output.contains("Car A1 removed successfully.\n"));
        assert!(output.contains("Cars in Parking Lot (Front → End):\nCar No: B2 | Owner: Bob\n"));
        assert!(output.contains("Cars in Parking Lot (End → Front):\nCar No: B2 | Owner: Bob\n"));
        assert!(output.ends_with("Exiting Parking Lot System.\n"));

        assert_eq!(registry.size(), 1);
    }

    #[test]
    fn empty_lot_and_strays() {
        let (_, output) = session(3, "2 Z9\n3\n4\n1 A1 Alice\n2 Z9\nseven\n5\n");

        assert_eq!(output.matches("Parking Lot is empty.\n").count(), 3);
        assert!(output.contains("Car Z9 not found.\n"));
        assert!(output.contains("Invalid choice. Please try again.\n"));
    }

    #[test]
    fn display_order_both_ways() {
        let (_, output) = session(3, "1 A1 Alice 1 B2 Bob 1 C3 Carol 3 4 5");

        let forward = "Cars in Parking Lot (Front → End):\n\
                       Car No: A1 | Owner: Alice\n\
                       Car No: B2 | Owner: Bob\n\
                       Car No: C3 | Owner: Carol\n";
        let backward = "Cars in Parking Lot (End → Front):\n\
                        Car No: C3 | Owner: Carol\n\
                        Car No: B2 | Owner: Bob\n\
                        Car No: A1 | Owner: Alice\n";
        assert!(output.contains(forward));
        assert!(output.contains(backward));
    }

    #[test]
    fn input_ending_midway_stops_quietly() {
        let (registry, output) = session(2, "1 A1");

        assert!(registry.is_empty());
        assert!(output.ends_with("Enter Owner Name: "));
        assert!(!output.contains("Exiting"));
    }

    #[test]
    fn garbled_bytes_are_just_a_bad_choice() {
        let mut registry = CarRegistry::new(2);
        let input: &[u8] = b"1 A1 Alice\n\xff\n3\n5\n";
        let mut menu = Menu::new(Cursor::new(input), Vec::new());
        menu.run(&mut registry).unwrap();
        let output = String::from_utf8(menu.into_output()).unwrap();

        assert!(output.contains("Invalid choice. Please try again.\n"));
        assert!(output.contains("Cars in Parking Lot (Front → End):\nCar No: A1 | Owner: Alice\n"));
        assert!(output.ends_with("Exiting Parking Lot System.\n"));

        let mut tokens = Tokens::new(Cursor::new(&b"\xffA1\xfe Bob\n"[..]));
        assert_eq!(tokens.next_token().unwrap().as_deref(), Some("\u{fffd}A1\u{fffd}"));
        assert_eq!(tokens.next_token().unwrap().as_deref(), Some("Bob"));
        assert_eq!(tokens.next_token().unwrap(), None);
    }

    #[test]
    fn capacity_is_reprompted() {
        let mut menu = Menu::new(Cursor::new("-3 lots\n4\n".as_bytes()), Vec::new());
        assert_eq!(menu.read_capacity().unwrap(), Some(4));

        let output = String::from_utf8(menu.into_output()).unwrap();
        assert_eq!(
            output
                .matches("Invalid capacity. Please enter a non-negative number.\n")
                .count(),
            2
        );

        let mut menu = Menu::new(Cursor::new("".as_bytes()), Vec::new());
        assert_eq!(menu.read_capacity().unwrap(), None);
    }
}
