use crate::error::Error;
use crate::modulus::WordOps;

/// Reverses the low `bit_width` bits of `index`, discarding higher bits.
/// Widths above usize::BITS keep the low word of the reversed field.
#[inline(always)]
pub fn reverse(index: usize, bit_width: u32) -> usize {
    index.reverse_bits_msb(bit_width)
}

/// Permutes `table` in place into bit-reversed index order.
pub fn permute<T>(table: &mut [T]) -> Result<(), Error> {
    let n: usize = table.len();
    if !n.is_power_of_two() {
        return Err(Error::PowerOfTwoLengthRequired { n });
    }
    let log_n: u32 = n.log2();
    for i in 0..n {
        let i_rev: usize = reverse(i, log_n);
        if i_rev > i {
            table.swap(i, i_rev);
        }
    }
    Ok(())
}
