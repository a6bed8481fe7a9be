use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// IDDFS gives up after this many rounds unless told otherwise.
pub const DEFAULT_MAX_DEPTH: u32 = 1000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Bfs,
    Dfs,
    Iddfs,
    AStar,
    Greedy,
}

impl Algorithm {
    pub const ALL: [Algorithm; 5] = [
        Algorithm::Bfs,
        Algorithm::Dfs,
        Algorithm::Iddfs,
        Algorithm::AStar,
        Algorithm::Greedy,
    ];

    /// Informed algorithms need a heuristic, the others must not get one.
    pub fn is_informed(self) -> bool {
        match self {
            Algorithm::AStar | Algorithm::Greedy => true,
            Algorithm::Bfs | Algorithm::Dfs | Algorithm::Iddfs => false,
        }
    }
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Algorithm::Bfs => write!(f, "bfs"),
            Algorithm::Dfs => write!(f, "dfs"),
            Algorithm::Iddfs => write!(f, "iddfs"),
            Algorithm::AStar => write!(f, "astar"),
            Algorithm::Greedy => write!(f, "greedy"),
        }
    }
}

impl FromStr for Algorithm {
    type Err = ConfigErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bfs" => Ok(Algorithm::Bfs),
            "dfs" => Ok(Algorithm::Dfs),
            "iddfs" => Ok(Algorithm::Iddfs),
            "astar" | "a*" => Ok(Algorithm::AStar),
            "greedy" | "ggs" => Ok(Algorithm::Greedy),
            _ => Err(ConfigErr::UnknownAlgorithm(s.to_owned())),
        }
    }
}

/// Granularity of the search
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Model {
    /// One successor per player step
    Move,
    /// One successor per push, walking to the box is free
    Push,
}

impl Display for Model {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Model::Move => write!(f, "move"),
            Model::Push => write!(f, "push"),
        }
    }
}

impl FromStr for Model {
    type Err = ConfigErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "move" | "moves" => Ok(Model::Move),
            "push" | "pushes" => Ok(Model::Push),
            _ => Err(ConfigErr::UnknownModel(s.to_owned())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Heuristic {
    /// Sum of distances of each box to its nearest goal
    Manhattan,
    /// Number of boxes not on a goal
    BoxesOut,
    /// Manhattan plus the player's distance to every box, not admissible
    PlayerBox,
    /// Minimum cost matching of boxes to goals
    Assignment,
}

impl Heuristic {
    pub const ALL: [Heuristic; 4] = [
        Heuristic::Manhattan,
        Heuristic::BoxesOut,
        Heuristic::PlayerBox,
        Heuristic::Assignment,
    ];

    pub fn is_admissible(self) -> bool {
        match self {
            Heuristic::Manhattan | Heuristic::BoxesOut | Heuristic::Assignment => true,
            Heuristic::PlayerBox => false,
        }
    }
}

impl Display for Heuristic {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Heuristic::Manhattan => write!(f, "manhattan"),
            Heuristic::BoxesOut => write!(f, "boxes-out"),
            Heuristic::PlayerBox => write!(f, "player-box"),
            Heuristic::Assignment => write!(f, "assignment"),
        }
    }
}

impl FromStr for Heuristic {
    type Err = ConfigErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "manhattan" => Ok(Heuristic::Manhattan),
            "boxes-out" => Ok(Heuristic::BoxesOut),
            "player-box" | "player-boxes" => Ok(Heuristic::PlayerBox),
            "assignment" => Ok(Heuristic::Assignment),
            _ => Err(ConfigErr::UnknownHeuristic(s.to_owned())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SearchConfig {
    pub algorithm: Algorithm,
    pub model: Model,
    pub heuristic: Option<Heuristic>,
    /// Only used by IDDFS
    pub max_depth: u32,
}

impl SearchConfig {
    pub fn new(algorithm: Algorithm, model: Model) -> Self {
        SearchConfig {
            algorithm,
            model,
            heuristic: None,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_heuristic(mut self, heuristic: Heuristic) -> Self {
        self.heuristic = Some(heuristic);
        self
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigErr> {
        match (self.algorithm.is_informed(), self.heuristic) {
            (true, None) => return Err(ConfigErr::MissingHeuristic(self.algorithm)),
            (false, Some(h)) => return Err(ConfigErr::UnexpectedHeuristic(self.algorithm, h)),
            _ => {}
        }
        if self.algorithm == Algorithm::Iddfs && self.max_depth == 0 {
            return Err(ConfigErr::NonPositiveDepth);
        }
        Ok(())
    }
}

impl Display for SearchConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} model", self.algorithm, self.model)?;
        if let Some(h) = self.heuristic {
            write!(f, ", {}", h)?;
        }
        if self.algorithm == Algorithm::Iddfs {
            write!(f, ", max depth {}", self.max_depth)?;
        }
        write!(f, ")")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigErr {
    MissingHeuristic(Algorithm),
    UnexpectedHeuristic(Algorithm, Heuristic),
    NonPositiveDepth,
    UnknownAlgorithm(String),
    UnknownModel(String),
    UnknownHeuristic(String),
}

impl Display for ConfigErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ConfigErr::MissingHeuristic(a) => write!(f, "{} needs a heuristic", a),
            ConfigErr::UnexpectedHeuristic(a, h) => {
                write!(f, "{} doesn't use a heuristic but got {}", a, h)
            }
            ConfigErr::NonPositiveDepth => write!(f, "Max depth must be at least 1"),
            ConfigErr::UnknownAlgorithm(s) => write!(f, "Unknown algorithm: {}", s),
            ConfigErr::UnknownModel(s) => write!(f, "Unknown model: {}", s),
            ConfigErr::UnknownHeuristic(s) => write!(f, "Unknown heuristic: {}", s),
        }
    }
}

impl Error for ConfigErr {}
