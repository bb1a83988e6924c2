//! A runtime view of how a list was laid out, and checks on it.
//!
//! The compiler already rejects a split that doesn't concatenate back into
//! its list. What it can't see is two types ending up on both sides of a
//! split, since types can't be compared for inequality in a bound. [`audit`]
//! looks at the finished tree with [`TypeId`]s instead.

use std::any::{type_name, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

use thiserror::Error;

use crate::list::Reflect;
use crate::select::{Build, StorageNode};
use crate::split::Split;
use crate::union::{Union0, Union1, Union2, Union3, Union4, Union5};

/// Identity and name of one type.
#[derive(Clone, Copy)]
pub struct TypeInfo {
    id: TypeId,
    name: &'static str,
}

impl TypeInfo {
    pub fn of<T: ?Sized + 'static>() -> Self {
        TypeInfo {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    #[inline]
    pub fn id(&self) -> TypeId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeInfo {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeInfo {}

impl Hash for TypeInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("`{0}` has more than one slot in the same union")]
    Duplicate(&'static str),

    #[error("`{0}` is stored on more than one side of a split")]
    Overlap(&'static str),

    #[error("the {0} side of a split is empty")]
    EmptySide(&'static str),

    #[error("split is unbalanced: {left} types on the left, {right} on the right")]
    Unbalanced { left: usize, right: usize },

    #[error("layout holds {found:?}, expected {expected:?}")]
    Reordered {
        expected: Vec<&'static str>,
        found: Vec<&'static str>,
    },
}

/// Mirror of a storage node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    Empty,
    Leaf(Vec<TypeInfo>),
    Split {
        left: Box<Shape>,
        pivot: TypeInfo,
        right: Box<Shape>,
    },
}

impl Shape {
    /// Every type with a slot, in list order.
    pub fn members(&self) -> Vec<TypeInfo> {
        let mut members = Vec::new();
        self.collect(&mut members);
        members
    }

    fn collect(&self, out: &mut Vec<TypeInfo>) {
        match self {
            Shape::Empty => {}
            Shape::Leaf(members) => out.extend_from_slice(members),
            Shape::Split { left, pivot, right } => {
                left.collect(out);
                out.push(*pivot);
                right.collect(out);
            }
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Shape::Empty => 0,
            Shape::Leaf(members) => members.len(),
            Shape::Split { left, right, .. } => left.len() + 1 + right.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of split levels, as in [`StorageNode::DEPTH`].
    pub fn depth(&self) -> usize {
        match self {
            Shape::Empty | Shape::Leaf(_) => 0,
            Shape::Split { left, right, .. } => left.depth().max(right.depth()) + 1,
        }
    }

    /// Checks that no type has two slots and that every split is balanced.
    pub fn verify(&self) -> Result<(), LayoutError> {
        match self {
            Shape::Empty => Ok(()),
            Shape::Leaf(members) => {
                for (i, member) in members.iter().enumerate() {
                    if members[..i].contains(member) {
                        return Err(LayoutError::Duplicate(member.name()));
                    }
                }
                Ok(())
            }
            Shape::Split { left, pivot, right } => {
                left.verify()?;
                right.verify()?;

                let (left, right) = (left.members(), right.members());

                if left.is_empty() {
                    return Err(LayoutError::EmptySide("left"));
                }
                if right.is_empty() {
                    return Err(LayoutError::EmptySide("right"));
                }
                if left.len() < right.len() || left.len() - right.len() > 1 {
                    return Err(LayoutError::Unbalanced {
                        left: left.len(),
                        right: right.len(),
                    });
                }
                if left.contains(pivot) || right.contains(pivot) {
                    return Err(LayoutError::Overlap(pivot.name()));
                }
                match left.iter().find(|member| right.contains(*member)) {
                    Some(member) => Err(LayoutError::Overlap(member.name())),
                    None => Ok(()),
                }
            }
        }
    }

    /// Checks that the slots, read in order, are exactly `expected`.
    pub fn matches(&self, expected: &[TypeInfo]) -> Result<(), LayoutError> {
        let found = self.members();
        if found == expected {
            Ok(())
        } else {
            Err(LayoutError::Reordered {
                expected: expected.iter().map(TypeInfo::name).collect(),
                found: found.iter().map(TypeInfo::name).collect(),
            })
        }
    }

    fn write(&self, f: &mut fmt::Formatter, indent: usize) -> fmt::Result {
        match self {
            Shape::Empty => f.write_str("empty"),
            Shape::Leaf(members) => {
                f.write_str("leaf(")?;
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    f.write_str(member.name())?;
                }
                f.write_str(")")
            }
            Shape::Split { left, pivot, right } => {
                let indent = indent + 2;
                writeln!(f, "split")?;
                write!(f, "{:indent$}left: ", "", indent = indent)?;
                left.write(f, indent)?;
                writeln!(f)?;
                writeln!(f, "{:indent$}pivot: {}", "", pivot, indent = indent)?;
                write!(f, "{:indent$}right: ", "", indent = indent)?;
                right.write(f, indent)
            }
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.write(f, 0)
    }
}

/// A storage node whose members are all `'static`, and so can be described.
pub trait Inspect: StorageNode {
    fn shape() -> Shape;
}

impl Inspect for Union0 {
    fn shape() -> Shape {
        Shape::Empty
    }
}

macro_rules! impl_inspect {
    ($($name:ident<$($generics:ident),*>),*) => (
        $(
            impl<$($generics: 'static),*> Inspect for $name<$($generics),*> {
                fn shape() -> Shape {
                    Shape::Leaf(<crate::type_list![$($generics),*] as Reflect>::infos())
                }
            }
        )*
    )
}

impl_inspect!(
    Union1<A>,
    Union2<A, B>,
    Union3<A, B, C>,
    Union4<A, B, C, D>,
    Union5<A, B, C, D, E>
);

impl<L: Inspect, P: 'static, R: Inspect> Inspect for Split<L, P, R> {
    fn shape() -> Shape {
        Shape::Split {
            left: Box::new(L::shape()),
            pivot: TypeInfo::of::<P>(),
            right: Box::new(R::shape()),
        }
    }
}

/// Builds the shape of `L`'s storage and checks it: no type may have two
/// slots, splits must be balanced, and the slots must follow `L`'s order.
pub fn audit<L>() -> Result<Shape, LayoutError>
where
    L: Build + Reflect,
    L::Node: Inspect,
{
    let shape = <L::Node as Inspect>::shape();
    shape.verify()?;
    shape.matches(&L::infos())?;
    Ok(shape)
}
