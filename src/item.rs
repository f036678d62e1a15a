use crate::operator::Operator;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Item {
    Literal(String),
    Expression(Expression),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Expression {
    pub operator: Operator,
    pub variable_list: Vec<Varspec>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Varspec {
    pub varname: String,
    pub modifier: Option<Modifier>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Modifier {
    Prefix(usize),
    Explode,
}

impl Varspec {
    pub fn is_explode(&self) -> bool {
        matches!(self.modifier, Some(Modifier::Explode))
    }

    pub fn prefix(&self) -> Option<usize> {
        match self.modifier {
            Some(Modifier::Prefix(size)) => Some(size),
            _ => None,
        }
    }
}
