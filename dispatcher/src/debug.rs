use std::io::{stdout, Stdout, Write};

use crossterm::{cursor, terminal, Result, ExecutableCommand};

use elevator::ElevatorSnapshot;

const HEADER_SIZE: u16 = 5;

/// Redraws a table of the fleet in place on every call.
pub struct Debug {
    stdout: Stdout,
    printed_lines: u16,
}

impl Debug {
    pub fn new() -> Self {
        Debug {
            stdout: stdout(),
            printed_lines: 0,
        }
    }

    pub fn printstatus(&mut self, snapshots: &[ElevatorSnapshot]) -> Result<()> {
        if self.printed_lines > 0 {
            self.stdout.execute(cursor::MoveUp(self.printed_lines))?;
        }
        self.stdout.execute(terminal::Clear(terminal::ClearType::FromCursorDown))?;

        writeln!(self.stdout, "+---------------------------------------------------------------------------------+")?;
        writeln!(self.stdout, "| ELEVATORS                                                                       |")?;
        writeln!(self.stdout, "+----------+------------+------------+----------+------------+---------+---------+")?;
        writeln!(self.stdout, "| {0:<8} | {1:<10} | {2:<10} | {3:<8} | {4:<10} | {5:<7} | {6:<7} |",
            "LABEL", "CLASS", "STATE", "FLOOR", "DIRECTION", "LOAD", "STOPS")?;
        writeln!(self.stdout, "+----------+------------+------------+----------+------------+---------+---------+")?;
        for elevator in snapshots {
            writeln!(self.stdout, "| {0:<8} | {1:<10} | {2:<10} | {3:<8} | {4:<10} | {5:>3}/{6:<3} | {7:<7} |",
                elevator.label,
                elevator.class.to_string(),
                elevator.behaviour.as_string(),
                elevator.floor,
                elevator.direction.as_string(),
                elevator.current_load,
                elevator.maximum_capacity,
                elevator.upward_stops + elevator.downward_stops)?;
            writeln!(self.stdout, "+----------+------------+------------+----------+------------+---------+---------+")?;
        }
        self.stdout.flush()?;

        self.printed_lines = HEADER_SIZE + 2 * snapshots.len() as u16;
        Ok(())
    }
}

impl Default for Debug {
    fn default() -> Self {
        Self::new()
    }
}
