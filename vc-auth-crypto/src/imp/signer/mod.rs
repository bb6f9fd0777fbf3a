pub mod es256k;
