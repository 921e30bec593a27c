//! Window layout.
//!
//! Windows are stacked vertically and share the terminal rows above the
//! echo area. Each window has a formal height (text rows plus its status
//! line) and an effective height (text rows only).

use crate::{Error, Result};

/// Smallest formal height: one text row and the status line.
pub const MIN_WINDOW_HEIGHT: usize = 2;

/// One window onto a buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window {
    /// Index of the displayed buffer in the session.
    pub buffer: usize,
    pub fwidth: usize,
    pub fheight: usize,
    pub ewidth: usize,
    pub eheight: usize,
    /// Screen row of point's line, counted from the window top.
    pub topdelta: usize,
    /// Line number of point at the last resync.
    pub lastpointn: usize,
    /// Point of this window while it does not have focus.
    pub saved_point: usize,
}

impl Window {
    fn new(buffer: usize, width: usize, height: usize) -> Self {
        Self {
            buffer,
            fwidth: width,
            fheight: height,
            ewidth: width,
            eheight: height.saturating_sub(1),
            topdelta: 0,
            lastpointn: 0,
            saved_point: 0,
        }
    }

    fn set_height(&mut self, height: usize) {
        self.fheight = height;
        self.eheight = height.saturating_sub(1);
    }

    fn set_width(&mut self, width: usize) {
        self.fwidth = width;
        self.ewidth = width;
    }

    /// Follow a change of point's line number.
    ///
    /// Small moves shift the viewport row along with point; a move that
    /// would leave the window recenters it.
    pub fn resync(&mut self, point_line: usize) {
        let delta = point_line as isize - self.lastpointn as isize;
        if delta != 0 {
            let topdelta = self.topdelta as isize;
            if (delta > 0 && topdelta + delta < self.eheight as isize)
                || (delta < 0 && topdelta >= -delta)
            {
                self.topdelta = (topdelta + delta) as usize;
            } else {
                self.recenter(point_line);
            }
        }
        self.lastpointn = point_line;
    }

    /// Put point's line in the middle of the window, or at its own row
    /// when near the top of the buffer.
    pub fn recenter(&mut self, point_line: usize) {
        self.topdelta = if point_line > self.eheight / 2 {
            self.eheight / 2
        } else {
            point_line
        };
    }
}

/// The stack of windows and the focused one.
#[derive(Debug, Clone)]
pub struct Layout {
    windows: Vec<Window>,
    focus: usize,
    width: usize,
    height: usize,
}

impl Layout {
    /// A single window on `buffer` filling a terminal of `width` x `height`
    /// (the last row is the echo area).
    pub fn new(buffer: usize, width: usize, height: usize) -> Result<Self> {
        check_terminal(width, height)?;
        Ok(Self {
            windows: vec![Window::new(buffer, width, height - 1)],
            focus: 0,
            width,
            height,
        })
    }

    pub fn windows(&self) -> &[Window] {
        &self.windows
    }

    pub fn window(&self, index: usize) -> &Window {
        &self.windows[index]
    }

    pub fn window_mut(&mut self, index: usize) -> &mut Window {
        &mut self.windows[index]
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub(crate) fn set_focus(&mut self, index: usize) {
        self.focus = index.min(self.windows.len() - 1);
    }

    pub fn focused(&self) -> &Window {
        &self.windows[self.focus]
    }

    pub fn focused_mut(&mut self) -> &mut Window {
        &mut self.windows[self.focus]
    }

    /// Terminal size as `(width, height)`.
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Index `steps` windows after (or, when negative, before) `index`.
    pub fn cycle(&self, index: usize, steps: i32) -> usize {
        let len = self.windows.len() as i64;
        (index as i64 + i64::from(steps)).rem_euclid(len) as usize
    }

    /// Fit the windows to a new terminal size.
    ///
    /// Missing rows are taken one at a time from the top window down, and
    /// windows that cannot shrink further are closed from the bottom. Extra
    /// rows are then handed out the same way.
    pub fn resize(&mut self, width: usize, height: usize) -> Result<()> {
        check_terminal(width, height)?;
        self.width = width;
        self.height = height;
        for window in &mut self.windows {
            window.set_width(width);
        }

        let available = height - 1;
        let mut total: usize = self.windows.iter().map(|w| w.fheight).sum();
        let mut next = 0;

        while total > available {
            let len = self.windows.len();
            let shrinkable = (0..len)
                .map(|i| (next + i) % len)
                .find(|&i| self.windows[i].fheight > MIN_WINDOW_HEIGHT);

            match shrinkable {
                Some(i) => {
                    let window = &mut self.windows[i];
                    window.set_height(window.fheight - 1);
                    total -= 1;
                    next = i + 1;
                }
                None => {
                    let removed = self.windows.pop().map_or(0, |w| w.fheight);
                    total -= removed;
                    self.focus = self.focus.min(self.windows.len() - 1);
                }
            }
        }

        next = 0;
        let len = self.windows.len();
        while total < available {
            let window = &mut self.windows[next % len];
            window.set_height(window.fheight + 1);
            total += 1;
            next += 1;
        }

        // Point's row must stay inside the text area
        for window in &mut self.windows {
            if window.topdelta >= window.eheight {
                window.recenter(window.lastpointn);
            }
        }

        Ok(())
    }

    /// Split the focused window in two; the new window goes below it,
    /// shows the same buffer, and gets the extra row of an odd height.
    ///
    /// Returns the new window's index. Focus stays put.
    pub fn split(&mut self, point_line: usize) -> Result<usize> {
        let current = &mut self.windows[self.focus];
        if current.fheight < 2 * MIN_WINDOW_HEIGHT {
            return Err(Error::TooSmallWindow {
                width: current.fwidth,
                height: current.fheight,
            });
        }

        let height = current.fheight;
        let mut below = current.clone();
        below.set_height(height / 2 + height % 2);
        current.set_height(height / 2);
        if current.topdelta >= current.eheight {
            current.recenter(point_line);
        }
        if below.topdelta >= below.eheight {
            below.recenter(point_line);
        }

        let index = self.focus + 1;
        self.windows.insert(index, below);
        Ok(index)
    }

    /// Remove window `index`, giving its rows to the window above it (or
    /// below, for the top window). Returns the index of that window.
    ///
    /// The sole window cannot be deleted.
    pub fn delete(&mut self, index: usize) -> Option<usize> {
        if self.windows.len() < 2 || index >= self.windows.len() {
            return None;
        }

        let removed = self.windows.remove(index);
        let heir = index.saturating_sub(1);
        let window = &mut self.windows[heir];
        window.set_height(window.fheight + removed.fheight);

        if self.focus == index {
            self.focus = heir;
        } else if self.focus > index {
            self.focus -= 1;
        }
        Some(heir)
    }

    /// Keep only the focused window, grown to the full height.
    pub fn delete_others(&mut self) {
        let mut keep = self.windows.swap_remove(self.focus);
        keep.set_height(self.height - 1);
        self.windows = vec![keep];
        self.focus = 0;
    }
}

fn check_terminal(width: usize, height: usize) -> Result<()> {
    if width < 1 || height < MIN_WINDOW_HEIGHT + 1 {
        return Err(Error::TooSmallWindow { width, height });
    }
    Ok(())
}
