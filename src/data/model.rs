use std::fmt;

// ---------------------------------------------------------------------------
// DataValue – a single cell of a data record
// ---------------------------------------------------------------------------

/// A dynamically-typed data value. Rendered through its natural string form.
#[derive(Debug, Clone, PartialEq)]
pub enum DataValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    /// ISO-8601 date string kept as text for simplicity.
    Date(String),
    Null,
}

impl fmt::Display for DataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataValue::String(s) => write!(f, "{s}"),
            DataValue::Integer(i) => write!(f, "{i}"),
            DataValue::Float(v) => write!(f, "{v}"),
            DataValue::Bool(b) => write!(f, "{b}"),
            DataValue::Date(d) => write!(f, "{d}"),
            DataValue::Null => write!(f, "null"),
        }
    }
}

impl From<&str> for DataValue {
    fn from(s: &str) -> Self {
        DataValue::String(s.to_string())
    }
}

impl From<String> for DataValue {
    fn from(s: String) -> Self {
        DataValue::String(s)
    }
}

impl From<i64> for DataValue {
    fn from(i: i64) -> Self {
        DataValue::Integer(i)
    }
}

impl From<f64> for DataValue {
    fn from(v: f64) -> Self {
        DataValue::Float(v)
    }
}

impl From<bool> for DataValue {
    fn from(b: bool) -> Self {
        DataValue::Bool(b)
    }
}

impl<T: Into<DataValue>> From<Option<T>> for DataValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(DataValue::Null, Into::into)
    }
}

// ---------------------------------------------------------------------------
// Dimension – one named axis
// ---------------------------------------------------------------------------

/// A named axis of data with an optional unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Dimension {
    name: String,
    unit: Option<String>,
}

impl Dimension {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            unit: None,
        }
    }

    pub fn with_unit(name: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            unit: Some(unit.into()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit(&self) -> Option<&str> {
        self.unit.as_deref()
    }

    /// Parse a column label of the form `name` or `name [unit]`.
    pub fn parse_label(label: &str) -> Self {
        let label = label.trim();
        if let Some(open) = label.rfind(" [") {
            if let Some(unit) = label[open + 2..].strip_suffix(']') {
                return Self::with_unit(&label[..open], unit);
            }
        }
        Self::new(label)
    }
}

/// Label form used in column headers: `name` or `name [unit]`.
impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.unit {
            Some(unit) => write!(f, "{} [{}]", self.name, unit),
            None => write!(f, "{}", self.name),
        }
    }
}

// ---------------------------------------------------------------------------
// DataRecord – scalar, 1D, 2D or 3D data
// ---------------------------------------------------------------------------

/// Structured data carried by a data chunk.
///
/// Tuples are fixed-size arrays, so every row of a two or three dimensional
/// record always has one component per dimension.
#[derive(Debug, Clone, PartialEq)]
pub enum DataRecord {
    Scalar {
        dimension: Dimension,
        value: DataValue,
    },
    OneDim {
        dimension: Dimension,
        values: Vec<DataValue>,
    },
    TwoDim {
        dimensions: [Dimension; 2],
        values: Vec<[DataValue; 2]>,
    },
    ThreeDim {
        dimensions: [Dimension; 3],
        values: Vec<[DataValue; 3]>,
    },
}

impl DataRecord {
    pub fn scalar(dimension: Dimension, value: impl Into<DataValue>) -> Self {
        DataRecord::Scalar {
            dimension,
            value: value.into(),
        }
    }

    pub fn one_dim(dimension: Dimension, values: Vec<DataValue>) -> Self {
        DataRecord::OneDim { dimension, values }
    }

    pub fn two_dim(first: Dimension, second: Dimension, values: Vec<[DataValue; 2]>) -> Self {
        DataRecord::TwoDim {
            dimensions: [first, second],
            values,
        }
    }

    pub fn three_dim(
        first: Dimension,
        second: Dimension,
        third: Dimension,
        values: Vec<[DataValue; 3]>,
    ) -> Self {
        DataRecord::ThreeDim {
            dimensions: [first, second, third],
            values,
        }
    }

    /// Dimensions in column order.
    pub fn dimensions(&self) -> &[Dimension] {
        match self {
            DataRecord::Scalar { dimension, .. } | DataRecord::OneDim { dimension, .. } => {
                std::slice::from_ref(dimension)
            }
            DataRecord::TwoDim { dimensions, .. } => dimensions.as_slice(),
            DataRecord::ThreeDim { dimensions, .. } => dimensions.as_slice(),
        }
    }

    /// Number of value rows.
    pub fn len(&self) -> usize {
        match self {
            DataRecord::Scalar { .. } => 1,
            DataRecord::OneDim { values, .. } => values.len(),
            DataRecord::TwoDim { values, .. } => values.len(),
            DataRecord::ThreeDim { values, .. } => values.len(),
        }
    }

    /// Whether the record has no value rows. A scalar is never empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn kind(&self) -> &'static str {
        match self {
            DataRecord::Scalar { .. } => "scalar",
            DataRecord::OneDim { .. } => "one-dimensional",
            DataRecord::TwoDim { .. } => "two-dimensional",
            DataRecord::ThreeDim { .. } => "three-dimensional",
        }
    }
}
