use crate::encoding::{push_allow_unreserved, push_allow_unreserved_reserved, PushAllow};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Operator {
    Simple,
    Reserved,
    Fragment,
    Label,
    PathSegment,
    PathParameter,
    FormQuery,
    FormContinuation,
}

/// How a rendered value is tagged with its name.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Naming {
    /// `value`
    Bare,
    /// `name=value`, also when the value is empty.
    Named,
    /// `name=value`, or just `name` when the value is empty.
    PathStyle,
}

pub struct OperatorTable {
    pub leader: &'static str,
    pub joiner: &'static str,
    pub naming: Naming,
    pub allows_reserved: bool,
}

static SIMPLE: OperatorTable = OperatorTable {
    leader: "",
    joiner: ",",
    naming: Naming::Bare,
    allows_reserved: false,
};

static RESERVED: OperatorTable = OperatorTable {
    leader: "",
    joiner: ",",
    naming: Naming::Bare,
    allows_reserved: true,
};

static FRAGMENT: OperatorTable = OperatorTable {
    leader: "#",
    joiner: ",",
    naming: Naming::Bare,
    allows_reserved: true,
};

static LABEL: OperatorTable = OperatorTable {
    leader: ".",
    joiner: ".",
    naming: Naming::Bare,
    allows_reserved: false,
};

static PATH_SEGMENT: OperatorTable = OperatorTable {
    leader: "/",
    joiner: "/",
    naming: Naming::Bare,
    allows_reserved: false,
};

static PATH_PARAMETER: OperatorTable = OperatorTable {
    leader: ";",
    joiner: ";",
    naming: Naming::PathStyle,
    allows_reserved: false,
};

static FORM_QUERY: OperatorTable = OperatorTable {
    leader: "?",
    joiner: "&",
    naming: Naming::Named,
    allows_reserved: false,
};

static FORM_CONTINUATION: OperatorTable = OperatorTable {
    leader: "&",
    joiner: "&",
    naming: Naming::Named,
    allows_reserved: false,
};

impl OperatorTable {
    pub fn allow(&self) -> PushAllow {
        if self.allows_reserved {
            push_allow_unreserved_reserved
        } else {
            push_allow_unreserved
        }
    }
}

impl Operator {
    pub fn from_char(c: char) -> Option<Operator> {
        match c {
            '+' => Some(Operator::Reserved),
            '#' => Some(Operator::Fragment),
            '.' => Some(Operator::Label),
            '/' => Some(Operator::PathSegment),
            ';' => Some(Operator::PathParameter),
            '?' => Some(Operator::FormQuery),
            '&' => Some(Operator::FormContinuation),
            _ => None,
        }
    }

    pub fn table(self) -> &'static OperatorTable {
        match self {
            Operator::Simple => &SIMPLE,
            Operator::Reserved => &RESERVED,
            Operator::Fragment => &FRAGMENT,
            Operator::Label => &LABEL,
            Operator::PathSegment => &PATH_SEGMENT,
            Operator::PathParameter => &PATH_PARAMETER,
            Operator::FormQuery => &FORM_QUERY,
            Operator::FormContinuation => &FORM_CONTINUATION,
        }
    }

    pub fn has_leader(self) -> bool {
        !self.table().leader.is_empty()
    }
}
