use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseEvent};

/// Input the app reacts to. Anything else only triggers a redraw.
#[derive(Debug, Clone, Copy)]
pub enum Input {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize,
}

pub fn poll_event(timeout: Duration) -> color_eyre::Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

pub fn next_input(timeout: Duration) -> color_eyre::Result<Option<Input>> {
    loop {
        match poll_event(timeout)? {
            Some(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                return Ok(Some(Input::Key(key)))
            }
            Some(Event::Mouse(mouse)) => return Ok(Some(Input::Mouse(mouse))),
            Some(Event::Resize(..)) => return Ok(Some(Input::Resize)),
            Some(_) => continue,
            None => return Ok(None),
        }
    }
}
