//! # tomlfilter-python
//!
//! Python bindings for the `from_toml` / `to_toml` template filters, built
//! with PyO3. A Python templating host registers them from `filters()`:
//!
//! ```python
//! import tomlfilter
//!
//! class FilterModule:
//!     def filters(self):
//!         return tomlfilter.filters()
//! ```
//!
//! Exposes:
//!
//! - `from_toml(text)` -- TOML string -> dict
//! - `to_toml(mapping)` -- mapping -> TOML string
//! - `filters()` -- `{"from_toml": ..., "to_toml": ...}`
//! - `HAS_TOML` -- whether the TOML codec was built in

use std::sync::OnceLock;

use pyo3::exceptions::{PyRuntimeError, PyTypeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::{PyBool, PyDict, PyFloat, PyInt, PyList, PyMapping, PyString, PyTuple};
use tomlfilter_core::{Filter, FilterError, FilterModule, Value, HAS_TOML};

fn module() -> &'static FilterModule {
    static FILTERS: OnceLock<FilterModule> = OnceLock::new();
    FILTERS.get_or_init(FilterModule::new)
}

/// Map each filter error kind onto the Python exception a host expects.
fn to_py_err(err: FilterError) -> PyErr {
    match &err {
        FilterError::Type { .. } => PyTypeError::new_err(err.to_string()),
        FilterError::MissingDependency { .. } => PyRuntimeError::new_err(err.to_string()),
        FilterError::Conversion { .. } | FilterError::UnknownFilter(_) => {
            PyValueError::new_err(err.to_string())
        }
    }
}

/// Convert a Python object into a [`Value`].
///
/// `str` is extracted strictly, so strings holding lone surrogates raise
/// instead of being silently replaced. Dates and times are taken through
/// `isoformat()`.
fn extract_value(obj: &Bound<'_, PyAny>) -> PyResult<Value> {
    if obj.is_none() {
        return Ok(Value::Null);
    }
    // bool before int: Python's bool is an int subclass.
    if let Ok(b) = obj.downcast::<PyBool>() {
        return Ok(Value::Bool(b.is_true()));
    }
    if obj.is_instance_of::<PyInt>() {
        return Ok(Value::Integer(obj.extract::<i64>()?));
    }
    if let Ok(f) = obj.downcast::<PyFloat>() {
        return Ok(Value::Float(f.value()));
    }
    if obj.is_instance_of::<PyString>() {
        return Ok(Value::String(obj.extract::<String>()?));
    }
    if let Ok(list) = obj.downcast::<PyList>() {
        return list
            .iter()
            .map(|item| extract_value(&item))
            .collect::<PyResult<Vec<_>>>()
            .map(Value::Array);
    }
    if let Ok(tuple) = obj.downcast::<PyTuple>() {
        return tuple
            .iter()
            .map(|item| extract_value(&item))
            .collect::<PyResult<Vec<_>>>()
            .map(Value::Array);
    }
    if let Ok(mapping) = obj.downcast::<PyMapping>() {
        let mut entries = Vec::new();
        for item in mapping.items()?.iter() {
            let (key, value): (String, Bound<'_, PyAny>) = item.extract()?;
            entries.push((key, extract_value(&value)?));
        }
        return Ok(Value::Map(entries));
    }
    if obj.hasattr("isoformat")? {
        let text: String = obj.call_method0("isoformat")?.extract()?;
        return Ok(Value::Datetime(text));
    }
    Err(PyTypeError::new_err(format!(
        "unsupported value type: {}",
        obj.get_type().name()?
    )))
}

/// `TypeError` naming the Python type of `obj`, in the filters' own wording.
fn type_error(filter: &Filter, expected: &'static str, obj: &Bound<'_, PyAny>) -> PyErr {
    let actual = obj
        .get_type()
        .name()
        .map(|name| name.to_string())
        .unwrap_or_else(|_| "object".to_string());
    to_py_err(FilterError::Type {
        filter: filter.name(),
        expected,
        actual: actual.into(),
    })
}

fn run_from_toml(
    filters: &FilterModule,
    py: Python<'_>,
    text: &Bound<'_, PyAny>,
) -> PyResult<PyObject> {
    let filter = Filter::FROM_TOML;
    filters.ensure_codec(&filter).map_err(to_py_err)?;
    if !text.is_instance_of::<PyString>() {
        return Err(type_error(&filter, "string", text));
    }
    let text: String = text
        .extract()
        .map_err(|e| to_py_err(FilterError::conversion(filter.name(), e)))?;
    let output = filters
        .from_toml(&Value::String(text))
        .map_err(to_py_err)?;
    value_into_py(py, output)
}

fn run_to_toml(
    filters: &FilterModule,
    py: Python<'_>,
    mapping: &Bound<'_, PyAny>,
) -> PyResult<PyObject> {
    let filter = Filter::TO_TOML;
    filters.ensure_codec(&filter).map_err(to_py_err)?;
    if mapping.downcast::<PyMapping>().is_err() {
        return Err(type_error(&filter, "mapping", mapping));
    }
    // Anything nested that has no Value form is a conversion failure.
    let input = extract_value(mapping)
        .map_err(|e| to_py_err(FilterError::conversion(filter.name(), e)))?;
    let output = filters.to_toml(&input).map_err(to_py_err)?;
    value_into_py(py, output)
}

/// Convert a [`Value`] into a Python object. Datetimes come back as strings.
fn value_into_py(py: Python<'_>, value: Value) -> PyResult<PyObject> {
    let obj = match value {
        Value::Null => py.None(),
        Value::Bool(b) => PyBool::new(py, b).to_owned().into_any().unbind(),
        Value::Integer(i) => i.into_pyobject(py)?.into_any().unbind(),
        Value::Float(f) => f.into_pyobject(py)?.into_any().unbind(),
        Value::String(s) | Value::Datetime(s) => s.into_pyobject(py)?.into_any().unbind(),
        Value::Array(items) => {
            let list = PyList::empty(py);
            for item in items {
                list.append(value_into_py(py, item)?)?;
            }
            list.into_any().unbind()
        }
        Value::Map(entries) => {
            let dict = PyDict::new(py);
            for (key, item) in entries {
                dict.set_item(key, value_into_py(py, item)?)?;
            }
            dict.into_any().unbind()
        }
    };
    Ok(obj)
}

/// Parse a TOML document.
///
/// Args:
///     text: A TOML string.
///
/// Returns:
///     A dict holding the parsed document.
///
/// Raises:
///     TypeError: If `text` is not a string.
///     ValueError: If the TOML is malformed.
///     RuntimeError: If the TOML codec is not built in.
#[pyfunction]
fn from_toml(py: Python<'_>, text: &Bound<'_, PyAny>) -> PyResult<PyObject> {
    run_from_toml(module(), py, text)
}

/// Serialize a mapping into a TOML document.
///
/// Args:
///     mapping: A dict (or any Mapping) of TOML-representable values.
///
/// Returns:
///     The TOML string.
///
/// Raises:
///     TypeError: If `mapping` is not a mapping.
///     ValueError: If a value cannot be represented in TOML, including
///         nested values with no TOML form (sets, ints beyond 64 bits,
///         non-string keys).
///     RuntimeError: If the TOML codec is not built in.
#[pyfunction]
fn to_toml(py: Python<'_>, mapping: &Bound<'_, PyAny>) -> PyResult<PyObject> {
    run_to_toml(module(), py, mapping)
}

/// The filter table for a templating host: filter name -> callable.
#[pyfunction]
#[pyo3(pass_module)]
fn filters<'py>(module: &Bound<'py, PyModule>) -> PyResult<Bound<'py, PyDict>> {
    let table = PyDict::new(module.py());
    for name in FilterModule::names() {
        table.set_item(name, module.getattr(name)?)?;
    }
    Ok(table)
}

/// The `tomlfilter` Python module, implemented in Rust via PyO3.
#[pymodule]
fn tomlfilter(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(from_toml, m)?)?;
    m.add_function(wrap_pyfunction!(to_toml, m)?)?;
    m.add_function(wrap_pyfunction!(filters, m)?)?;
    m.add("HAS_TOML", HAS_TOML)?;
    Ok(())
}
