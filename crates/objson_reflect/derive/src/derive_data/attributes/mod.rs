mod field_attributes;
mod flags;
mod property;
mod type_attributes;

pub(crate) use field_attributes::FieldAttributes;
pub(crate) use flags::TraitImplSwitches;
pub(crate) use property::PropertyAttribute;
pub(crate) use type_attributes::TypeAttributes;
