/* demos/module_header.rs */
#![allow(missing_docs)]

use byte_reader::{ByteReader, Error, SliceSource};

fn main() {
	let module = build_sample_module();
	let mut src = SliceSource::new(&module);

	let result = dump_sections(&mut ByteReader::new(&mut src));
	if let Err(e) = result {
		eprintln!("Decode error at offset {}: {e}", src.position());
	}
}

fn dump_sections(r: &mut ByteReader<'_, SliceSource<'_>>) -> Result<(), Error> {
	let magic = r.read_array::<4>()?;
	println!("Magic: {magic:02x?}");
	println!("Version: {}", r.read_u32()?);

	while !r.source().is_empty() {
		let id = r.read_u8()?;
		let size = r.read_uleb128()? as usize;
		if id == 0 {
			let start = r.source().position();
			let name = r.read_name()?;
			let consumed = r.source().position() - start;
			println!("Custom section {name:?} ({size} bytes)");
			r.skip(size.saturating_sub(consumed))?;
		} else {
			println!("Section {id} ({size} bytes)");
			r.skip(size)?;
		}
	}
	Ok(())
}

fn build_sample_module() -> Vec<u8> {
	let mut m = vec![0x00, 0x61, 0x73, 0x6D]; // magic
	m.extend_from_slice(&[0x01, 0x00, 0x00, 0x00]); // version

	// type section: one `() -> ()` signature
	m.extend_from_slice(&[0x01, 0x04, 0x01, 0x60, 0x00, 0x00]);

	// custom section "name" with a 3-byte payload
	let name = b"name";
	m.push(0x00);
	m.push((1 + name.len() + 3) as u8);
	m.push(name.len() as u8);
	m.extend_from_slice(name);
	m.extend_from_slice(&[0x01, 0x02, 0x03]);
	m
}
