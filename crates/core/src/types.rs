use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub fn manhattan(self, other: Pos) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

/// Tile-type codes written into the generation grid.
///
/// The integer codes are stable: downstream consumers instantiate sprites,
/// enemies and items from them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TileKind {
    Empty,
    Floor,
    Wall,
    Obstacle,
    Player,
    Enemy,
    HealthPotion,
    ArmourPotion,
    HealthBoostPotion,
    ArmourBoostPotion,
    SpeedBoostPotion,
    FireRateBoostPotion,
    DebugWall,
}

impl TileKind {
    pub const ALL: [TileKind; 13] = [
        TileKind::Empty,
        TileKind::Floor,
        TileKind::Wall,
        TileKind::Obstacle,
        TileKind::Player,
        TileKind::Enemy,
        TileKind::HealthPotion,
        TileKind::ArmourPotion,
        TileKind::HealthBoostPotion,
        TileKind::ArmourBoostPotion,
        TileKind::SpeedBoostPotion,
        TileKind::FireRateBoostPotion,
        TileKind::DebugWall,
    ];

    pub fn code(self) -> u8 {
        match self {
            TileKind::Empty => 1,
            TileKind::Floor => 2,
            TileKind::Wall => 3,
            TileKind::Obstacle => 4,
            TileKind::Player => 5,
            TileKind::Enemy => 6,
            TileKind::HealthPotion => 7,
            TileKind::ArmourPotion => 8,
            TileKind::HealthBoostPotion => 9,
            TileKind::ArmourBoostPotion => 10,
            TileKind::SpeedBoostPotion => 11,
            TileKind::FireRateBoostPotion => 12,
            TileKind::DebugWall => 13,
        }
    }

    pub fn from_code(code: u8) -> Option<TileKind> {
        TileKind::ALL.into_iter().find(|tile| tile.code() == code)
    }

    /// Tiles the presentation layer skips entirely instead of drawing.
    pub fn is_replaceable(self) -> bool {
        matches!(self, TileKind::Empty | TileKind::Obstacle | TileKind::DebugWall)
    }

    /// Floor plus every entity or item placement code, all of which sit on a floor backdrop.
    pub fn is_walkable(self) -> bool {
        !self.is_replaceable() && self != TileKind::Wall
    }

    pub fn is_item(self) -> bool {
        matches!(
            self,
            TileKind::HealthPotion
                | TileKind::ArmourPotion
                | TileKind::HealthBoostPotion
                | TileKind::ArmourBoostPotion
                | TileKind::SpeedBoostPotion
                | TileKind::FireRateBoostPotion
        )
    }

    pub fn ascii(self) -> char {
        match self {
            TileKind::Empty => ' ',
            TileKind::Floor => '.',
            TileKind::Wall => '#',
            TileKind::Obstacle => 'o',
            TileKind::Player => '@',
            TileKind::Enemy => 'e',
            TileKind::DebugWall => '%',
            _ => '!',
        }
    }
}

/// Axis-aligned rectangle with inclusive corners.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Rect {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        debug_assert!(x1 <= x2 && y1 <= y2, "inverted rect ({x1}, {y1}, {x2}, {y2})");
        Self { x1, y1, x2, y2 }
    }

    /// Number of tile columns covered.
    pub fn width(self) -> i32 {
        self.x2 - self.x1 + 1
    }

    /// Number of tile rows covered.
    pub fn height(self) -> i32 {
        self.y2 - self.y1 + 1
    }

    pub fn area(self) -> i64 {
        i64::from(self.width()) * i64::from(self.height())
    }

    pub fn center(self) -> Pos {
        Pos { y: (self.y1 + self.y2) / 2, x: (self.x1 + self.x2) / 2 }
    }

    pub fn expanded(self, margin: i32) -> Self {
        Self {
            x1: self.x1 - margin,
            y1: self.y1 - margin,
            x2: self.x2 + margin,
            y2: self.y2 + margin,
        }
    }

    pub fn intersects(self, other: &Self) -> bool {
        self.x1 <= other.x2 && self.x2 >= other.x1 && self.y1 <= other.y2 && self.y2 >= other.y1
    }

    pub fn contains(self, pos: Pos) -> bool {
        pos.x >= self.x1 && pos.x <= self.x2 && pos.y >= self.y1 && pos.y <= self.y2
    }

    pub fn contains_rect(self, other: &Self) -> bool {
        other.x1 >= self.x1 && other.x2 <= self.x2 && other.y1 >= self.y1 && other.y2 <= self.y2
    }

    /// Clips to `bounds`, returning `None` when nothing is left.
    pub fn clipped(self, bounds: &Self) -> Option<Self> {
        let clipped = Self {
            x1: self.x1.max(bounds.x1),
            y1: self.y1.max(bounds.y1),
            x2: self.x2.min(bounds.x2),
            y2: self.y2.min(bounds.y2),
        };
        (clipped.x1 <= clipped.x2 && clipped.y1 <= clipped.y2).then_some(clipped)
    }

    /// Tiles of the one-tile ring just outside this rectangle.
    pub fn ring(self) -> impl Iterator<Item = Pos> {
        let outer = self.expanded(1);
        (outer.y1..=outer.y2).flat_map(move |y| {
            (outer.x1..=outer.x2)
                .map(move |x| Pos { y, x })
                .filter(move |pos| !self.contains(*pos))
        })
    }

    pub fn positions(self) -> impl Iterator<Item = Pos> {
        (self.y1..=self.y2).flat_map(move |y| (self.x1..=self.x2).map(move |x| Pos { y, x }))
    }
}
