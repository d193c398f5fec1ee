use rand::rngs::{StdRng, ThreadRng};
use rand::RngCore;

/// A source of uniformly distributed bytes for the RND instruction
pub trait RandomByte {
    fn random_byte(&mut self) -> u8;
}

impl RandomByte for ThreadRng {
    fn random_byte(&mut self) -> u8 {
        self.next_u32() as u8
    }
}

impl RandomByte for StdRng {
    fn random_byte(&mut self) -> u8 {
        self.next_u32() as u8
    }
}

impl<T: RandomByte + ?Sized> RandomByte for &mut T {
    fn random_byte(&mut self) -> u8 {
        (**self).random_byte()
    }
}
