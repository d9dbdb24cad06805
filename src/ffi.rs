//! C ABI 边界：供其他语言以动态库形式调用
//! 返回的字符串由本库分配，调用方必须用配对的释放函数归还

use std::ffi::{CStr, CString, c_char};

use crate::detector::parse_user_agent_short;

/// 解析 User-Agent，返回紧凑形式的新分配C字符串
///
/// 入参为NULL或转换失败时返回NULL。返回值须经
/// [`free_user_agent_ffi`] 释放，不可用其他分配器释放。
#[unsafe(no_mangle)]
pub extern "C" fn parse_user_agent_ffi(raw: *const c_char) -> *mut c_char {
    if raw.is_null() {
        return std::ptr::null_mut();
    }

    // 非UTF-8字节按替换字符处理，不拒绝输入
    let input = unsafe { CStr::from_ptr(raw) }.to_string_lossy();
    let short = parse_user_agent_short(&input);

    // 结果不含内部NUL（ShortName仅由token与分号构成），失败时返回NULL兜底
    match CString::new(short) {
        Ok(s) => s.into_raw(),
        Err(_) => std::ptr::null_mut(),
    }
}

/// 释放 [`parse_user_agent_ffi`] 返回的字符串
///
/// 传入NULL为空操作。同一指针不可重复释放。
#[unsafe(no_mangle)]
pub extern "C" fn free_user_agent_ffi(ptr: *mut c_char) {
    if ptr.is_null() {
        return;
    }
    unsafe {
        drop(CString::from_raw(ptr));
    }
}
