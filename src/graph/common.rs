/// Edge direction relative to a vertex, `Outgoing` selects successors and
/// `Incoming` selects predecessors. Undirected graphs ignore it.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Direction {
    Outgoing,
    Incoming,
}

impl Direction {
    pub fn opposite(&self) -> Self {
        match self {
            Self::Outgoing => Self::Incoming,
            Self::Incoming => Self::Outgoing,
        }
    }
}

impl From<Direction> for usize {
    fn from(value: Direction) -> Self {
        if let Direction::Outgoing = value {
            0
        } else {
            1
        }
    }
}

impl From<Direction> for petgraph::Direction {
    fn from(value: Direction) -> Self {
        match value {
            Direction::Outgoing => petgraph::Direction::Outgoing,
            Direction::Incoming => petgraph::Direction::Incoming,
        }
    }
}

impl From<petgraph::Direction> for Direction {
    fn from(value: petgraph::Direction) -> Self {
        match value {
            petgraph::Direction::Outgoing => Self::Outgoing,
            petgraph::Direction::Incoming => Self::Incoming,
        }
    }
}
