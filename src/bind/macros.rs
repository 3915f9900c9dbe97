/// Declare a record struct and implement [`Record`](crate::bind::Record) and
/// [`Bind`](crate::bind::Bind) for it.
///
/// Fields bind in declaration order. Fields declared `pub` are public; fields without a
/// visibility qualifier are private and only walked when the options ask for it.
/// `#[bind(rename = "key")]` after a field's doc comment changes its value-tree key.
/// The struct must derive `Debug` and `Default`.
///
/// ```
/// jsonbind::record! {
/// 	#[derive(Debug, Default, PartialEq)]
/// 	pub struct Point {
/// 		pub x: i32,
/// 		#[bind(rename = "Y")]
/// 		pub y: i32,
/// 	}
/// }
///
/// let point: Point = jsonbind::bind::from_str(r#"{"x":1,"Y":2}"#, &Default::default()).unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
#[macro_export]
macro_rules! record {
	(
		$(#[$meta:meta])*
		$vis:vis struct $name:ident {
			$(
				$(#[doc = $doc:literal])*
				$(#[bind(rename = $rename:literal)])?
				$fvis:vis $field:ident : $fty:ty
			),* $(,)?
		}
	) => {
		$(#[$meta])*
		$vis struct $name {
			$(
				$(#[doc = $doc])*
				$fvis $field: $fty,
			)*
		}

		impl $name {
			/// Field descriptor, built on first use.
			pub fn descriptor() -> &'static $crate::bind::RecordDesc<$name> {
				static DESC: ::std::sync::OnceLock<$crate::bind::RecordDesc<$name>> = ::std::sync::OnceLock::new();
				DESC.get_or_init(|| $crate::bind::RecordDesc {
					type_name: ::std::stringify!($name),
					fields: ::std::vec![
						$(
							$crate::bind::FieldDesc::<$name> {
								name: $crate::__bind_key!($field $(, $rename)?),
								ident: ::std::stringify!($field),
								visibility: $crate::bind::Visibility::from_token(::std::stringify!($fvis)),
								kind: <$fty as $crate::bind::Bind>::kind(),
								type_name: ::std::stringify!($fty),
								decode: |dest, node, src, cx| {
									dest.$field = <$fty as $crate::bind::Bind>::decode(node, ::std::option::Option::Some(src), cx)?;
									::std::result::Result::Ok(())
								},
								encode: |src, cx| <$fty as $crate::bind::Bind>::encode(&src.$field, cx),
							},
						)*
					],
				})
			}
		}

		impl $crate::bind::Record for $name {
			fn type_name(&self) -> &'static str {
				::std::stringify!($name)
			}

			fn decode_fields(&mut self, src: &$crate::bind::ValueMap, cx: &mut $crate::bind::Decoder<'_>) -> $crate::bind::Result<()> {
				$crate::bind::decode_fields_with(Self::descriptor(), self, src, cx)
			}

			fn encode_fields(&self, out: &mut $crate::bind::ValueMap, cx: &mut $crate::bind::Encoder<'_>) -> $crate::bind::Result<()> {
				$crate::bind::encode_fields_with(Self::descriptor(), self, out, cx)
			}

			fn as_any(&self) -> &dyn ::std::any::Any {
				self
			}

			fn as_any_mut(&mut self) -> &mut dyn ::std::any::Any {
				self
			}

			fn as_record(&self) -> &dyn $crate::bind::Record {
				self
			}

			fn into_record(self: ::std::boxed::Box<Self>) -> ::std::boxed::Box<dyn $crate::bind::Record> {
				self
			}
		}

		impl $crate::bind::Bind for $name {
			fn kind() -> $crate::bind::TypeKind {
				$crate::bind::TypeKind::Record
			}

			fn decode(
				node: &$crate::bind::Value,
				parent: ::std::option::Option<&$crate::bind::ValueMap>,
				cx: &mut $crate::bind::Decoder<'_>,
			) -> $crate::bind::Result<Self> {
				$crate::bind::decode_record::<Self>(node, parent, cx)
			}

			fn encode(&self, cx: &mut $crate::bind::Encoder<'_>) -> $crate::bind::Result<::std::option::Option<$crate::bind::Value>> {
				$crate::bind::encode_record(self, false, cx).map(::std::option::Option::Some)
			}
		}
	};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __bind_key {
	($field:ident) => {
		::std::stringify!($field)
	};
	($field:ident, $rename:literal) => {
		$rename
	};
}

/// Implement [`Family`](crate::bind::Family) for a polymorphic base trait object.
///
/// The base trait must have [`Record`](crate::bind::Record) as a supertrait. Without a
/// fallback the base is abstract: decoding with no creator opinion and no type tag
/// fails with `NoConcreteType`.
///
/// ```ignore
/// pub trait Fruit: Record {}
/// jsonbind::family!(dyn Fruit, fallback = Plain);
/// ```
#[macro_export]
macro_rules! family {
	(dyn $base:ident) => {
		$crate::family!(@impl $base, ::std::option::Option::None);
	};
	(dyn $base:ident, fallback = $fallback:ty) => {
		$crate::family!(
			@impl $base,
			::std::option::Option::Some(::std::boxed::Box::new(<$fallback as ::std::default::Default>::default()))
		);
	};
	(@impl $base:ident, $fallback:expr) => {
		impl $crate::bind::Family for dyn $base {
			const NAME: &'static str = ::std::stringify!($base);

			fn fallback() -> ::std::option::Option<::std::boxed::Box<Self>> {
				$fallback
			}
		}
	};
}

/// Declare a fieldless enum bound by member name.
///
/// Encoding writes the declared member name, never the discriminant. Decoding an
/// unknown name fails with `UnknownEnumMember`.
#[macro_export]
macro_rules! enumeration {
	(
		$(#[$meta:meta])*
		$vis:vis enum $name:ident {
			$(
				$(#[$vmeta:meta])*
				$variant:ident
			),* $(,)?
		}
	) => {
		$(#[$meta])*
		$vis enum $name {
			$(
				$(#[$vmeta])*
				$variant,
			)*
		}

		impl $name {
			/// Declared members in order.
			pub const MEMBERS: &'static [Self] = &[$(Self::$variant),*];

			/// Declared member name.
			pub fn name(&self) -> &'static str {
				match self {
					$(Self::$variant => ::std::stringify!($variant),)*
				}
			}

			/// Member declared as `name`.
			pub fn from_name(name: &str) -> ::std::option::Option<Self> {
				match name {
					$(::std::stringify!($variant) => ::std::option::Option::Some(Self::$variant),)*
					_ => ::std::option::Option::None,
				}
			}
		}

		impl $crate::bind::Bind for $name {
			fn kind() -> $crate::bind::TypeKind {
				$crate::bind::TypeKind::Enum
			}

			fn decode(
				node: &$crate::bind::Value,
				_parent: ::std::option::Option<&$crate::bind::ValueMap>,
				cx: &mut $crate::bind::Decoder<'_>,
			) -> $crate::bind::Result<Self> {
				let name = node.as_str().ok_or_else(|| cx.shape_mismatch("string", node))?;
				Self::from_name(name).ok_or_else(|| cx.unknown_member(::std::stringify!($name), name))
			}

			fn encode(&self, _cx: &mut $crate::bind::Encoder<'_>) -> $crate::bind::Result<::std::option::Option<$crate::bind::Value>> {
				::std::result::Result::Ok(::std::option::Option::Some($crate::bind::Value::from(self.name())))
			}
		}
	};
}
