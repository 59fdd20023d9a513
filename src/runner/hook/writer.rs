use crate::runner::ds::object::JsObjectType;
use crate::runner::ds::object_property::{PropertyDescriptor, PropertyKey};
use crate::runner::ds::operations::object::{define_property_or_throw, find_property, set};
use crate::runner::ds::value::JsValue;
use crate::runner::hook::error::{HookError, Result};

/// Installs `value` at `target[key]`, shaped after `reference`'s own descriptor for `key`.
///
/// The reference's attributes carry over with only the value replaced; an accessor turns
/// into a data property that keeps its enumerability and configurability. A reference
/// property that is neither configurable nor writable is never touched. Without a
/// reference descriptor the value is assigned as a plain property of `target` itself; an
/// accessor found along `target`'s chain is shadowed rather than invoked.
pub fn write_value(
    target: &JsObjectType,
    key: PropertyKey,
    value: JsValue,
    reference: &JsObjectType,
) -> Result<()> {
    let existing = (**reference)
        .borrow()
        .as_js_object()
        .get_own_property(&key)
        .cloned();
    match existing {
        Some(descriptor) => {
            if !descriptor.is_configurable() && !descriptor.is_writable() {
                return Err(HookError::ImmutableProperty {
                    key: key.to_string(),
                });
            }
            define_property_or_throw(target, key, descriptor.with_value(value))?;
        }
        None => {
            let installed = match find_property(target, &key) {
                // Assignment would hand the value to the setter and leave `target` as it was.
                Some(PropertyDescriptor::Accessor { .. }) => (**target)
                    .borrow_mut()
                    .as_js_object_mut()
                    .define_own_property(key.clone(), PropertyDescriptor::data(value)),
                _ => set(target, key.clone(), value)?,
            };
            if !installed {
                return Err(HookError::ImmutableProperty {
                    key: key.to_string(),
                });
            }
        }
    }
    Ok(())
}
