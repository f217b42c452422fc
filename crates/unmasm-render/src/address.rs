//! Recognition of the indexed addressing shape `[base + index*scale + disp]`.
//!
//! Decoders do not agree on how the three terms are associated: both
//! `(a + b) + c` and `a + (b + c)` show up, with the terms in any order. The
//! matcher flattens either grouping into three terms and assigns roles by
//! shape, so every arrangement renders the same canonical text.

use unmasm_core::{Expression, IntegerValue, Register, RegisterNamer};

/// A recognised `[base + index*scale + disp]` address.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexedAddress<'e> {
    /// Register added without scaling.
    pub base: &'e Register,
    /// Register multiplied by the scale.
    pub index: &'e Register,
    /// Scale literal.
    pub scale: &'e IntegerValue,
    /// Displacement literal.
    pub displacement: &'e IntegerValue,
}

impl<'e> IndexedAddress<'e> {
    /// Matches the address expression of a memory reference.
    ///
    /// Returns `None` unless the tree is an addition of exactly one bare
    /// register, one register-times-literal product and one bare literal.
    pub fn match_address(address: &'e Expression) -> Option<Self> {
        let terms = flatten_sum(address)?;

        let mut base = None;
        let mut index = None;
        let mut displacement = None;
        for term in terms {
            match classify(term)? {
                Role::Base(reg) => replace_once(&mut base, reg)?,
                Role::Displacement(value) => replace_once(&mut displacement, value)?,
                Role::Index(reg, scale) => replace_once(&mut index, (reg, scale))?,
            }
        }

        let (index, scale) = index?;
        if scale.unsigned() == 0 {
            return None;
        }
        Some(Self {
            base: base?,
            index,
            scale,
            displacement: displacement?,
        })
    }

    /// Returns the scale factor.
    pub fn scale(&self) -> u64 {
        self.scale.unsigned()
    }

    /// Returns the sign-extended displacement.
    pub fn displacement(&self) -> i64 {
        self.displacement.signed()
    }

    /// Renders `[base+index*scale±0xdisp]`.
    ///
    /// `*1` is never printed. The sign comes from the displacement's own
    /// declared width; its magnitude prints as hex.
    pub fn render(&self, namer: &dyn RegisterNamer) -> String {
        let mut out = String::with_capacity(24);
        out.push('[');
        out.push_str(&namer.register_name(self.base));
        out.push('+');
        out.push_str(&namer.register_name(self.index));
        let scale = self.scale();
        if scale != 1 {
            out.push_str(&format!("*{:x}", scale));
        }
        let disp = self.displacement();
        if self.displacement.is_negative() {
            out.push_str(&format!("-{:#x}", disp.wrapping_neg() as u64));
        } else {
            out.push_str(&format!("+{:#x}", disp as u64));
        }
        out.push(']');
        out
    }
}

enum Role<'e> {
    Base(&'e Register),
    Index(&'e Register, &'e IntegerValue),
    Displacement(&'e IntegerValue),
}

/// Recovers the three terms of a two-level addition, whichever side nests.
fn flatten_sum(expr: &Expression) -> Option<[&Expression; 3]> {
    let Expression::Add(lhs, rhs) = expr else {
        return None;
    };
    match (lhs.as_ref(), rhs.as_ref()) {
        (Expression::Add(a, b), c) => Some([a.as_ref(), b.as_ref(), c]),
        (a, Expression::Add(b, c)) => Some([a, b.as_ref(), c.as_ref()]),
        _ => None,
    }
}

fn classify(term: &Expression) -> Option<Role<'_>> {
    match term {
        Expression::DirectRegister(reg) => Some(Role::Base(reg)),
        Expression::IntegerValue(value) => Some(Role::Displacement(value)),
        Expression::Multiply(lhs, rhs) => match (lhs.as_ref(), rhs.as_ref()) {
            (Expression::DirectRegister(reg), Expression::IntegerValue(scale))
            | (Expression::IntegerValue(scale), Expression::DirectRegister(reg)) => {
                Some(Role::Index(reg, scale))
            }
            _ => None,
        },
        _ => None,
    }
}

/// Fills `slot`, failing if the role was already taken.
fn replace_once<T>(slot: &mut Option<T>, value: T) -> Option<()> {
    if slot.is_some() {
        return None;
    }
    *slot = Some(value);
    Some(())
}
