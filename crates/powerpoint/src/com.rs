//! Late-bound COM dispatch helpers.
//!
//! Everything PowerPoint exposes is reached through `IDispatch`: members are
//! resolved by name to a DISPID and invoked with `VARIANT` arguments. These
//! helpers wrap that plumbing so the application layer can read like the
//! automation calls it makes.

use std::mem::ManuallyDrop;
use std::os::windows::ffi::OsStrExt;
use std::path::Path;

use deck2pdf_core::{Error, Result};
use windows::core::{BSTR, GUID, PCWSTR};
use windows::Win32::System::Com::{
    CLSIDFromProgID, CoCreateInstance, CoInitializeEx, CoUninitialize, IDispatch,
    CLSCTX_LOCAL_SERVER, COINIT_APARTMENTTHREADED, DISPATCH_FLAGS, DISPPARAMS, EXCEPINFO,
};
use windows::Win32::System::Ole::{
    DISPATCH_METHOD, DISPATCH_PROPERTYGET, DISPATCH_PROPERTYPUT, DISPID_PROPERTYPUT,
};
use windows::Win32::System::Variant::{VariantClear, VARIANT, VT_BSTR, VT_DISPATCH, VT_I4};

const LOCALE_USER_DEFAULT: u32 = 0x0400;

/// Apartment-threaded COM runtime guard for the calling thread.
pub struct ComSession(());

impl ComSession {
    /// Initialize the COM runtime for the calling thread.
    pub fn initialize() -> Result<Self> {
        unsafe { CoInitializeEx(None, COINIT_APARTMENTTHREADED) }
            .map_err(|e| Error::Automation(format!("Failed to initialize COM: {}", e)))?;
        Ok(Self(()))
    }
}

impl Drop for ComSession {
    fn drop(&mut self) {
        unsafe { CoUninitialize() };
    }
}

/// A late-bound handle to a COM automation object.
pub struct ComObject(IDispatch);

impl ComObject {
    /// Create the automation object registered under `prog_id`.
    pub fn create(prog_id: &str) -> Result<Self> {
        let wide: Vec<u16> = prog_id.encode_utf16().chain(std::iter::once(0)).collect();

        let clsid = unsafe { CLSIDFromProgID(PCWSTR(wide.as_ptr())) }
            .map_err(|e| Error::Automation(format!("'{}' is not registered: {}", prog_id, e)))?;

        let dispatch: IDispatch = unsafe { CoCreateInstance(&clsid, None, CLSCTX_LOCAL_SERVER) }
            .map_err(|e| Error::Automation(format!("Failed to start '{}': {}", prog_id, e)))?;

        Ok(Self(dispatch))
    }

    /// Call a method, discarding its result.
    pub fn call(&self, method: &str, args: Vec<VARIANT>) -> Result<()> {
        let mut result = self.invoke(method, DISPATCH_METHOD, args)?;
        unsafe {
            let _ = VariantClear(&mut result);
        }
        Ok(())
    }

    /// Call a method that returns another automation object.
    pub fn call_object(&self, method: &str, args: Vec<VARIANT>) -> Result<ComObject> {
        let result = self.invoke(method, DISPATCH_METHOD, args)?;
        dispatch_from_variant(result, method)
    }

    /// Read a property that holds another automation object.
    pub fn get_object(&self, property: &str) -> Result<ComObject> {
        let result = self.invoke(property, DISPATCH_PROPERTYGET, Vec::new())?;
        dispatch_from_variant(result, property)
    }

    /// Assign a property.
    pub fn put(&self, property: &str, value: VARIANT) -> Result<()> {
        let mut result = self.invoke(property, DISPATCH_PROPERTYPUT, vec![value])?;
        unsafe {
            let _ = VariantClear(&mut result);
        }
        Ok(())
    }

    /// Resolve a member name to its DISPID.
    fn dispid(&self, member: &str) -> Result<i32> {
        let wide: Vec<u16> = member.encode_utf16().chain(std::iter::once(0)).collect();
        let name = PCWSTR(wide.as_ptr());
        let mut dispid = 0i32;

        unsafe {
            self.0
                .GetIDsOfNames(&GUID::zeroed(), &name, 1, LOCALE_USER_DEFAULT, &mut dispid)
        }
        .map_err(|e| Error::Automation(format!("Unknown member '{}': {}", member, e)))?;

        Ok(dispid)
    }

    /// Invoke a member. Arguments are given in natural order; dispatch
    /// expects them right-to-left, so they are reversed here. All argument
    /// variants are cleared before returning.
    fn invoke(&self, member: &str, flags: DISPATCH_FLAGS, mut args: Vec<VARIANT>) -> Result<VARIANT> {
        let dispid = self.dispid(member)?;

        args.reverse();

        let mut named_put = DISPID_PROPERTYPUT;
        let mut params = DISPPARAMS {
            rgvarg: args.as_mut_ptr(),
            cArgs: args.len() as u32,
            ..Default::default()
        };
        if flags == DISPATCH_PROPERTYPUT {
            // A property put carries its right-hand side as a named argument.
            params.rgdispidNamedArgs = &mut named_put;
            params.cNamedArgs = 1;
        }

        let mut result = VARIANT::default();
        let mut excep = EXCEPINFO::default();
        let invoked = unsafe {
            self.0.Invoke(
                dispid,
                &GUID::zeroed(),
                LOCALE_USER_DEFAULT,
                flags,
                &params,
                Some(&mut result),
                Some(&mut excep),
                None,
            )
        };

        for arg in args.iter_mut() {
            unsafe {
                let _ = VariantClear(arg);
            }
        }

        invoked.map_err(|e| Error::Automation(describe_failure(member, &e, &excep)))?;

        Ok(result)
    }
}

/// VARIANT holding a 32-bit integer.
pub fn variant_i32(value: i32) -> VARIANT {
    let mut variant = VARIANT::default();
    unsafe {
        variant.Anonymous.Anonymous.vt = VT_I4;
        variant.Anonymous.Anonymous.Anonymous.lVal = value;
    }
    variant
}

/// VARIANT holding a BSTR copy of a filesystem path.
pub fn variant_path(path: &Path) -> Result<VARIANT> {
    let wide: Vec<u16> = path.as_os_str().encode_wide().collect();
    let bstr = BSTR::from_wide(&wide)
        .map_err(|e| Error::Automation(format!("Path is not representable: {}", e)))?;

    let mut variant = VARIANT::default();
    unsafe {
        variant.Anonymous.Anonymous.vt = VT_BSTR;
        variant.Anonymous.Anonymous.Anonymous.bstrVal = ManuallyDrop::new(bstr);
    }
    Ok(variant)
}

/// Take the dispatch interface out of a result VARIANT.
fn dispatch_from_variant(mut variant: VARIANT, member: &str) -> Result<ComObject> {
    unsafe {
        if variant.Anonymous.Anonymous.vt != VT_DISPATCH {
            let _ = VariantClear(&mut variant);
            return Err(Error::Automation(format!(
                "'{}' did not return an automation object",
                member
            )));
        }

        // Clone takes a reference of its own before the variant is cleared.
        let dispatch = (*variant.Anonymous.Anonymous.Anonymous.pdispVal).clone();
        let _ = VariantClear(&mut variant);

        match dispatch {
            Some(dispatch) => Ok(ComObject(dispatch)),
            None => Err(Error::Automation(format!(
                "'{}' returned a null object",
                member
            ))),
        }
    }
}

/// Readable message for a failed invoke, preferring the server's own
/// exception text when it supplied any.
fn describe_failure(member: &str, error: &windows::core::Error, excep: &EXCEPINFO) -> String {
    let description = excep.bstrDescription.to_string();
    if description.trim().is_empty() {
        format!("{} failed: {}", member, error)
    } else {
        format!("{} failed: {}", member, description.trim())
    }
}
