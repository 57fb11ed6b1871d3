use std::{
    io::{self, stdout, Write},
    sync::mpsc,
    thread::{self, JoinHandle},
};

use tracing::{debug, error};

use crate::{pos, sim::SimEvent, Pos, SimHandle, World};

pub use canvas::Canvas;
mod canvas;

pub const BORDER_GLYPH: char = '█';
pub const ALIVE_GLYPH: char = 'O';

pub struct View {
    thread: JoinHandle<Option<u64>>,
}

impl View {
    pub fn spawn<W>(events: mpsc::Receiver<SimEvent<W>>, handle: SimHandle) -> Self
    where
        W: World,
    {
        let thread = thread::spawn(move || view_loop(events, handle));
        Self { thread }
    }

    /// waits for the view, returns the generation the game ended at, if it did.
    pub fn join(self) -> Option<u64> {
        match self.thread.join() {
            Ok(ended) => ended,
            Err(payload) => std::panic::resume_unwind(payload),
        }
    }
}

fn view_loop<W>(events: mpsc::Receiver<SimEvent<W>>, handle: SimHandle) -> Option<u64>
where
    W: World,
{
    let mut out = stdout();
    let in_place = termion::is_tty(&out);

    for event in events {
        match event {
            SimEvent::Generation { generation, world } => {
                if let Err(err) = display_world(&mut out, &world, in_place) {
                    error!(generation, "could not draw generation: {err}");
                    handle.stop();
                    return None;
                }
            }
            SimEvent::Ended { generation } => {
                debug!(generation, "view received end of game");
                return Some(generation);
            }
        }
    }
    None
}

/// frames the world with a border one glyph thick.
pub fn draw_world<W>(world: &W) -> Canvas
where
    W: World,
{
    let (width, height) = (world.width(), world.height());
    let mut canvas = Canvas::new(width as usize + 2, height as usize + 2);

    canvas.layer(|Pos { x, y }| {
        let on_border = x == 0 || y == 0 || x == width + 1 || y == height + 1;
        on_border.then_some(BORDER_GLYPH)
    });
    canvas.layer(|pos| world.is_alive(pos - pos!(1, 1)).then_some(ALIVE_GLYPH));
    canvas
}

fn display_world<W>(out: &mut impl Write, world: &W, in_place: bool) -> io::Result<()>
where
    W: World,
{
    if in_place {
        let clear = termion::clear::All;
        let goto = termion::cursor::Goto(1, 1);
        write!(out, "{clear}{goto}")?;
    }
    draw_world(world).display(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Grid;

    #[test]
    fn test_draw_world_frame() {
        let world = Grid::new(3, 2, [pos!(0, 0), pos!(2, 1)]).unwrap();
        let lines: Vec<_> = draw_world(&world).lines().collect();
        assert_eq!(lines, vec!["█████", "█O  █", "█  O█", "█████"]);
    }

    #[test]
    fn test_draw_single_cell_world() {
        let world = Grid::new(1, 1, []).unwrap();
        let lines: Vec<_> = draw_world(&world).lines().collect();
        assert_eq!(lines, vec!["███", "█ █", "███"]);
    }

    #[test]
    fn test_display_plain_output() {
        let world = Grid::new(2, 1, [pos!(1, 0)]).unwrap();
        let mut out = Vec::new();
        display_world(&mut out, &world, false).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "████\n█ O█\n████\n");
    }

    #[test]
    fn test_display_in_place_clears_first() {
        let world = Grid::new(1, 1, [pos!(0, 0)]).unwrap();
        let mut out = Vec::new();
        display_world(&mut out, &world, true).unwrap();
        let expected = format!("{}{}███\n█O█\n███\n", termion::clear::All, termion::cursor::Goto(1, 1));
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }
}
