use crate::ui::Position;

/// Box sizes used when placing imported nodes on the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    pub node_width: f64,
    pub node_height: f64,
    /// Space between a group's border and its children, and between children.
    pub padding: f64,
    /// Room for the group title above its children.
    pub header_height: f64,
    /// Horizontal space between top-level nodes.
    pub gap: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: 200.0,
            node_height: 30.0,
            padding: 15.0,
            header_height: 30.0,
            gap: 50.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl LayoutConfig {
    pub fn leaf_size(&self) -> Size {
        Size {
            width: self.node_width,
            height: self.node_height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Direction {
    /// Side by side, for `Serial`.
    Row,
    /// Stacked, for `Parallel`.
    Column,
}

/// Places the children of one group and accumulates the group's size.
pub(super) struct BoxPacker<'c> {
    config: &'c LayoutConfig,
    direction: Direction,
    /// Next free offset along the main axis.
    cursor: f64,
    /// Largest child extent across the main axis.
    cross: f64,
}

impl<'c> BoxPacker<'c> {
    pub(super) fn new(config: &'c LayoutConfig, direction: Direction) -> Self {
        Self {
            config,
            direction,
            cursor: config.padding,
            cross: 0.0,
        }
    }

    /// Position of the next child, relative to the group.
    pub(super) fn next_position(&self) -> Position {
        let top = self.config.header_height + self.config.padding;
        match self.direction {
            Direction::Row => Position {
                x: self.cursor,
                y: top,
            },
            Direction::Column => Position {
                x: self.config.padding,
                y: self.config.header_height + self.cursor,
            },
        }
    }

    pub(super) fn place(&mut self, size: Size) {
        match self.direction {
            Direction::Row => {
                self.cursor += size.width + self.config.padding;
                self.cross = self.cross.max(size.height);
            }
            Direction::Column => {
                self.cursor += size.height + self.config.padding;
                self.cross = self.cross.max(size.width);
            }
        }
    }

    pub(super) fn finish(self) -> Size {
        let LayoutConfig {
            padding,
            header_height,
            ..
        } = *self.config;
        let size = match self.direction {
            Direction::Row => Size {
                width: self.cursor,
                height: self.cross + 2.0 * padding + header_height,
            },
            Direction::Column => Size {
                width: self.cross + 2.0 * padding,
                height: header_height + self.cursor,
            },
        };
        Size {
            width: size.width.max(self.config.node_width),
            height: size.height.max(self.config.node_height),
        }
    }
}
