use std::fmt;

/// Event kinds. Numbers outside the known table are carried as
/// [`EventKind::Unknown`] so their replaceability can still be judged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Metadata,
    TextNote,
    ContactList,
    Repost,
    Reaction,
    MuteList,
    PinnedNotes,
    RelayListMetadata,
    BookmarkList,
    FollowSets,
    RelaySets,
    BookmarkSets,
    LongFormArticle,
    DraftLongFormArticle,
    ApplicationSpecificData,
    LiveEvent,
    CalendarDateBasedEvent,
    CalendarTimeBasedEvent,
    Calendar,
    HandlerInformation,
    Unknown(u16),
}

const KIND_TABLE: &[(u16, EventKind)] = &[
    (0, EventKind::Metadata),
    (1, EventKind::TextNote),
    (3, EventKind::ContactList),
    (6, EventKind::Repost),
    (7, EventKind::Reaction),
    (10000, EventKind::MuteList),
    (10001, EventKind::PinnedNotes),
    (10002, EventKind::RelayListMetadata),
    (10003, EventKind::BookmarkList),
    (30000, EventKind::FollowSets),
    (30002, EventKind::RelaySets),
    (30003, EventKind::BookmarkSets),
    (30023, EventKind::LongFormArticle),
    (30024, EventKind::DraftLongFormArticle),
    (30078, EventKind::ApplicationSpecificData),
    (30311, EventKind::LiveEvent),
    (31922, EventKind::CalendarDateBasedEvent),
    (31923, EventKind::CalendarTimeBasedEvent),
    (31924, EventKind::Calendar),
    (31990, EventKind::HandlerInformation),
];

impl EventKind {
    /// Looks `value` up in the known table only.
    pub fn from_u16(value: u16) -> Option<Self> {
        KIND_TABLE
            .iter()
            .find(|(number, _)| *number == value)
            .map(|(_, kind)| *kind)
    }

    pub fn as_u16(self) -> u16 {
        if let Self::Unknown(number) = self {
            return number;
        }
        KIND_TABLE
            .iter()
            .find(|(_, kind)| *kind == self)
            .map(|(number, _)| *number)
            .unwrap_or_default()
    }

    pub fn is_known(self) -> bool {
        !matches!(self, Self::Unknown(_))
    }

    /// NIP-01 addressable range: 30000 <= n < 40000.
    pub fn is_addressable(self) -> bool {
        (30000..40000).contains(&self.as_u16())
    }

    /// NIP-01 replaceable kinds: 0, 3 and 10000 <= n < 20000.
    pub fn is_normal_replaceable(self) -> bool {
        let n = self.as_u16();
        n == 0 || n == 3 || (10000..20000).contains(&n)
    }
}

impl From<u16> for EventKind {
    fn from(value: u16) -> Self {
        Self::from_u16(value).unwrap_or(Self::Unknown(value))
    }
}

impl From<EventKind> for u16 {
    fn from(kind: EventKind) -> Self {
        kind.as_u16()
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u16())
    }
}
