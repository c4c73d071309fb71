// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use crate::error::{Error, FieldRef};
use crate::meta::{FieldDef, Metadata, StructDef, TypeDef, Variant};
use crate::resolver::context::{ReadContext, WriteContext};
use crate::resolver::schema_resolver::StructDefResolver;
use crate::serializer::util::identity_hash;
use crate::serializer::BondType;
use crate::types::{BondDataType, Modifier};
use crate::value::{StructValue, Value};
use crate::{bail, ensure};
use log::trace;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// One field of a struct schema.
#[derive(Debug)]
pub struct StructField {
    id: u16,
    name: String,
    modifier: Modifier,
    field_type: BondType,
    default_value: Value,
    owner: String,
}

impl StructField {
    #[inline(always)]
    pub fn id(&self) -> u16 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline(always)]
    pub fn modifier(&self) -> Modifier {
        self.modifier
    }

    #[inline(always)]
    pub fn is_required(&self) -> bool {
        self.modifier == Modifier::Required
    }

    pub fn field_type(&self) -> &BondType {
        &self.field_type
    }

    pub fn default_value(&self) -> &Value {
        &self.default_value
    }

    /// Qualified name of the struct declaring this field.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn field_ref(&self) -> FieldRef {
        FieldRef::new(self.owner.as_str(), self.name.as_str(), self.id)
    }
}

struct StructDescriptor {
    name: String,
    qualified_name: String,
    generic_arguments: Vec<BondType>,
    base: Option<StructBondType>,
    fields: Vec<StructField>,
    field_index: HashMap<u16, usize>,
    hash: u64,
}

/// Descriptor of one struct schema.
///
/// Identity is the qualified name plus the generic type arguments: two
/// descriptors built independently for the same schema are equal and hash
/// alike. The descriptor is immutable once [`StructBuilder::build`] returns,
/// and cloning only bumps a reference count.
#[derive(Clone)]
pub struct StructBondType(Arc<StructDescriptor>);

impl StructBondType {
    pub fn builder(qualified_name: impl Into<String>) -> StructBuilder {
        StructBuilder {
            qualified_name: qualified_name.into(),
            generic_arguments: Vec::new(),
            base: None,
            fields: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn qualified_name(&self) -> &str {
        &self.0.qualified_name
    }

    #[inline(always)]
    pub fn bond_data_type(&self) -> BondDataType {
        BondDataType::BT_STRUCT
    }

    pub fn generic_type_arguments(&self) -> &[BondType] {
        &self.0.generic_arguments
    }

    pub fn base(&self) -> Option<&StructBondType> {
        self.0.base.as_ref()
    }

    /// Fields of this level in declaration order, base fields excluded.
    pub fn fields(&self) -> &[StructField] {
        &self.0.fields
    }

    pub fn field(&self, id: u16) -> Option<&StructField> {
        self.0.field_index.get(&id).map(|&idx| &self.0.fields[idx])
    }

    #[inline(always)]
    pub fn precomputed_hash(&self) -> u64 {
        self.0.hash
    }

    /// Instance with every field, base levels included, set to its default.
    pub fn default_struct_value(&self) -> StructValue {
        let mut value = StructValue::new();
        if let Some(base) = &self.0.base {
            value.set_base(base.default_struct_value());
        }
        for field in self.0.fields.iter() {
            value.set(field.id, field.default_value.clone());
        }
        value
    }

    pub fn serialize_value(&self, context: &mut WriteContext, value: &Value) -> Result<(), Error> {
        match value {
            Value::Struct(v) => self.serialize_struct(context, v),
            other => Err(Error::value_validation(format!(
                "Value of kind {} cannot be encoded as struct {}",
                other.kind(),
                self.qualified_name()
            ))),
        }
    }

    pub fn deserialize_value(&self, context: &mut ReadContext) -> Result<Value, Error> {
        Ok(Value::Struct(self.deserialize_struct(context)?))
    }

    /// Writes the struct body: every hierarchy level, each followed by its
    /// stop marker.
    pub fn serialize_struct(
        &self,
        context: &mut WriteContext,
        value: &StructValue,
    ) -> Result<(), Error> {
        self.serialize_level(context, value, false)
    }

    fn serialize_level(
        &self,
        context: &mut WriteContext,
        value: &StructValue,
        is_base: bool,
    ) -> Result<(), Error> {
        let desc = &self.0;
        if let Some((id, _)) = value.fields().find(|(id, _)| !desc.field_index.contains_key(id)) {
            bail!("Struct {} has no field with ordinal {}", desc.qualified_name, id);
        }
        match (&desc.base, value.base()) {
            (Some(base), Some(base_value)) => base.serialize_level(context, base_value, true)?,
            (Some(base), None) => {
                base.serialize_level(context, &base.default_struct_value(), true)?
            }
            (None, Some(_)) => bail!(
                "Struct {} has no base but the value carries a base instance",
                desc.qualified_name
            ),
            (None, None) => {}
        }
        for field in desc.fields.iter() {
            field
                .field_type
                .serialize_field(context, value.get(field.id), field)?;
        }
        context.writer.write_struct_end(is_base);
        Ok(())
    }

    /// Reads one struct body up to and including its final `BT_STOP`.
    /// Unknown ordinals are skipped by wire shape; absent fields take their
    /// defaults, except required ones which fail validation.
    pub fn deserialize_struct(&self, context: &mut ReadContext) -> Result<StructValue, Error> {
        context.inc_depth()?;
        let result = self.deserialize_level(context, false);
        context.dec_depth();
        result
    }

    fn deserialize_level(
        &self,
        context: &mut ReadContext,
        is_base: bool,
    ) -> Result<StructValue, Error> {
        let desc = &self.0;
        let mut value = StructValue::new();
        if let Some(base) = &desc.base {
            value.set_base(base.deserialize_level(context, true)?);
        }
        let mut seen = vec![false; desc.fields.len()];
        loop {
            let header = context.reader.read_field_begin()?;
            context.read_field_result = header;
            match header.tag {
                BondDataType::BT_STOP if is_base => {
                    return Err(Error::deserialization(format!(
                        "Struct {} ended inside its base level",
                        desc.qualified_name
                    )));
                }
                BondDataType::BT_STOP => break,
                BondDataType::BT_STOP_BASE if is_base => break,
                BondDataType::BT_STOP_BASE => {
                    // payload is a type derived from this one
                    trace!(
                        "Skipping derived levels of a {} payload",
                        desc.qualified_name
                    );
                    context.reader.skip_to_struct_end(context.depth_budget())?;
                    break;
                }
                tag => {
                    match desc.field_index.get(&header.id) {
                        Some(&idx) => {
                            let field = &desc.fields[idx];
                            ensure!(
                                !seen[idx],
                                Error::value_validation(format!(
                                    "Field {} appears more than once",
                                    field.field_ref()
                                ))
                            );
                            let field_value = field.field_type.deserialize_field(context, field)?;
                            value.set(field.id, field_value);
                            seen[idx] = true;
                        }
                        None => {
                            trace!(
                                "Skipping unknown field {} ({:?}) of {}",
                                header.id,
                                tag,
                                desc.qualified_name
                            );
                            context.reader.skip(tag, context.depth_budget())?;
                        }
                    }
                    context.reader.read_field_end();
                }
            }
        }
        for (idx, field) in desc.fields.iter().enumerate() {
            if seen[idx] {
                continue;
            }
            if field.is_required() {
                return Err(Error::struct_field_deserialization(
                    field.field_ref(),
                    Error::value_validation("Required field is missing"),
                ));
            }
            value.set(field.id, field.default_value.clone());
        }
        Ok(value)
    }

    pub fn create_schema_type_def(
        &self,
        resolver: &mut StructDefResolver,
    ) -> Result<TypeDef, Error> {
        let index = resolver.resolve(self)?;
        Ok(TypeDef::struct_def(index))
    }

    /// Builds the exported definition of this struct. Nested struct types
    /// are registered with `resolver` along the way.
    pub(crate) fn create_struct_def(
        &self,
        resolver: &mut StructDefResolver,
    ) -> Result<StructDef, Error> {
        let desc = &self.0;
        let base_def = match &desc.base {
            Some(base) => Some(base.create_schema_type_def(resolver)?),
            None => None,
        };
        let mut fields = Vec::with_capacity(desc.fields.len());
        for field in desc.fields.iter() {
            fields.push(FieldDef {
                metadata: Metadata {
                    name: field.name.clone(),
                    qualified_name: String::new(),
                    modifier: field.modifier,
                    default_value: Variant::from_value(&field.default_value),
                },
                id: field.id,
                type_def: field.field_type.create_schema_type_def(resolver)?,
            });
        }
        Ok(StructDef {
            metadata: Metadata {
                name: desc.name.clone(),
                qualified_name: desc.qualified_name.clone(),
                modifier: Modifier::Optional,
                default_value: Variant::nothing(),
            },
            base_def,
            fields,
        })
    }
}

impl PartialEq for StructBondType {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
            || (self.0.hash == other.0.hash
                && self.0.qualified_name == other.0.qualified_name
                && self.0.generic_arguments == other.0.generic_arguments)
    }
}

impl Eq for StructBondType {}

impl Hash for StructBondType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.0.hash);
    }
}

impl fmt::Debug for StructBondType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StructBondType")
            .field("qualified_name", &self.0.qualified_name)
            .field("base", &self.0.base.as_ref().map(|b| b.qualified_name()))
            .field(
                "fields",
                &self.0.fields.iter().map(|f| f.id).collect::<Vec<_>>(),
            )
            .finish()
    }
}

struct PendingField {
    id: u16,
    name: String,
    modifier: Modifier,
    field_type: BondType,
    default_value: Option<Value>,
}

/// Assembles a [`StructBondType`].
///
/// ```
/// use bond_core::{BondType, Modifier, StructBondType};
///
/// let point = StructBondType::builder("geo.Point")
///     .field(0, "x", Modifier::Required, BondType::int32())
///     .field_with_default(1, "y", Modifier::Optional, BondType::int32(), 7i32)
///     .build()
///     .unwrap();
/// assert_eq!(point.name(), "Point");
/// assert_eq!(point.fields().len(), 2);
/// ```
pub struct StructBuilder {
    qualified_name: String,
    generic_arguments: Vec<BondType>,
    base: Option<StructBondType>,
    fields: Vec<PendingField>,
}

impl StructBuilder {
    pub fn generic_argument(mut self, ty: impl Into<BondType>) -> Self {
        self.generic_arguments.push(ty.into());
        self
    }

    pub fn base(mut self, base: &StructBondType) -> Self {
        self.base = Some(base.clone());
        self
    }

    pub fn field(
        mut self,
        id: u16,
        name: impl Into<String>,
        modifier: Modifier,
        ty: impl Into<BondType>,
    ) -> Self {
        self.fields.push(PendingField {
            id,
            name: name.into(),
            modifier,
            field_type: ty.into(),
            default_value: None,
        });
        self
    }

    pub fn field_with_default(
        mut self,
        id: u16,
        name: impl Into<String>,
        modifier: Modifier,
        ty: impl Into<BondType>,
        default_value: impl Into<Value>,
    ) -> Self {
        self.fields.push(PendingField {
            id,
            name: name.into(),
            modifier,
            field_type: ty.into(),
            default_value: Some(default_value.into()),
        });
        self
    }

    pub fn build(self) -> Result<StructBondType, Error> {
        let base_name = self.qualified_name.trim().to_string();
        ensure!(
            !base_name.is_empty(),
            Error::invalid_schema("Struct qualified name must not be empty")
        );
        let qualified_name = render_generic_name(&base_name, &self.generic_arguments);
        let short = base_name.rsplit('.').next().unwrap_or(base_name.as_str());
        let name = render_generic_name(short, &self.generic_arguments);

        let mut field_index = HashMap::with_capacity(self.fields.len());
        let mut names = HashSet::with_capacity(self.fields.len());
        let mut fields = Vec::with_capacity(self.fields.len());
        for pending in self.fields {
            ensure!(
                field_index.insert(pending.id, fields.len()).is_none(),
                Error::invalid_schema(format!(
                    "Duplicate field ordinal {} in struct {}",
                    pending.id, qualified_name
                ))
            );
            ensure!(
                names.insert(pending.name.clone()),
                Error::invalid_schema(format!(
                    "Duplicate field name {} in struct {}",
                    pending.name, qualified_name
                ))
            );
            let default_value = match pending.default_value {
                None => pending.field_type.default_value(),
                Some(v) => match &pending.field_type {
                    BondType::Primitive(p) if p.accepts(&v) => v,
                    other => {
                        return Err(Error::invalid_schema(format!(
                            "Default of kind {} is not valid for field {} of type {}",
                            v.kind(),
                            pending.name,
                            other.full_name()
                        )))
                    }
                },
            };
            fields.push(StructField {
                id: pending.id,
                name: pending.name,
                modifier: pending.modifier,
                field_type: pending.field_type,
                default_value,
                owner: qualified_name.clone(),
            });
        }

        let arg_hashes: Vec<u64> = self
            .generic_arguments
            .iter()
            .map(BondType::precomputed_hash)
            .collect();
        let hash = identity_hash("struct", &(qualified_name.as_str(), arg_hashes));
        Ok(StructBondType(Arc::new(StructDescriptor {
            name,
            qualified_name,
            generic_arguments: self.generic_arguments,
            base: self.base,
            fields,
            field_index,
            hash,
        })))
    }
}

fn render_generic_name(name: &str, arguments: &[BondType]) -> String {
    if arguments.is_empty() {
        return name.to_string();
    }
    let args: Vec<String> = arguments.iter().map(BondType::full_name).collect();
    format!("{}<{}>", name, args.join(", "))
}
