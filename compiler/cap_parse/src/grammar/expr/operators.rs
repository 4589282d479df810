//! Operator matching helpers.

use cap_ir::{AugOp, BinaryOp, CompareOp, TokenKind};

use crate::Parser;

impl Parser<'_> {
    pub(crate) fn match_compare_op(&self) -> Option<CompareOp> {
        match self.cursor.current_kind()? {
            TokenKind::EqEq => Some(CompareOp::Eq),
            TokenKind::NotEq => Some(CompareOp::NotEq),
            TokenKind::Lt => Some(CompareOp::Lt),
            TokenKind::LtEq => Some(CompareOp::LtEq),
            TokenKind::Gt => Some(CompareOp::Gt),
            TokenKind::GtEq => Some(CompareOp::GtEq),
            _ => None,
        }
    }

    pub(crate) fn match_aug_op(&self) -> Option<AugOp> {
        match self.cursor.current_kind()? {
            TokenKind::PlusAssign => Some(AugOp::Add),
            TokenKind::MinusAssign => Some(AugOp::Sub),
            TokenKind::StarAssign => Some(AugOp::Mul),
            TokenKind::SlashAssign => Some(AugOp::Div),
            TokenKind::PercentAssign => Some(AugOp::Mod),
            _ => None,
        }
    }

    pub(crate) fn match_additive_op(&self) -> Option<BinaryOp> {
        match self.cursor.current_kind()? {
            TokenKind::Plus => Some(BinaryOp::Add),
            TokenKind::Minus => Some(BinaryOp::Sub),
            _ => None,
        }
    }

    pub(crate) fn match_multiplicative_op(&self) -> Option<BinaryOp> {
        match self.cursor.current_kind()? {
            TokenKind::Star => Some(BinaryOp::Mul),
            TokenKind::Slash => Some(BinaryOp::Div),
            TokenKind::Percent => Some(BinaryOp::Mod),
            _ => None,
        }
    }
}
